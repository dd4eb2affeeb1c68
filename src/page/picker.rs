use log::debug;

use super::dom::{Dom, NodeId, Selector};
use super::state::Mutation;
use crate::config::Markup;
use crate::platform::PlatformLabel;

/// Which download element was chosen for a platform, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// A target whose triples match the platform
    Matched(NodeId),
    /// Apple silicon visitor offered the Intel macOS build
    MacFallback(NodeId),
    /// The generic "other downloads" element
    Backup(NodeId),
    Nothing,
}

impl Pick {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Pick::Matched(n) | Pick::MacFallback(n) | Pick::Backup(n) => Some(*n),
            Pick::Nothing => None,
        }
    }
}

/// Trait for choosing which download button to reveal for a platform
pub trait DownloadPicker {
    fn pick(&self, dom: &dyn Dom, label: PlatformLabel) -> Pick;

    /// Pick and un-hide the download element for `label`
    fn reveal(&self, dom: &mut dyn Dom, label: PlatformLabel) -> Pick;
}

/// Matches the label's target hints against each target's `data-targets` list
pub struct TargetPicker {
    markup: Markup,
}

impl TargetPicker {
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }

    /// Check if a whitespace-separated target list serves the platform
    fn matches_label(targets: &str, label: PlatformLabel) -> bool {
        targets.split_whitespace().any(|triple| {
            label
                .target_hints()
                .iter()
                .any(|hint| triple.contains(hint))
        })
    }

    fn find_target(&self, dom: &dyn Dom, label: PlatformLabel) -> Option<NodeId> {
        dom.query_all(
            None,
            &Selector::class(&self.markup.target_class).has_data(&self.markup.targets_attr),
        )
        .into_iter()
        .find(|node| {
            dom.data(*node, &self.markup.targets_attr)
                .is_some_and(|targets| Self::matches_label(&targets, label))
        })
    }
}

impl Default for TargetPicker {
    fn default() -> Self {
        Self::new(Markup::default())
    }
}

impl DownloadPicker for TargetPicker {
    fn pick(&self, dom: &dyn Dom, label: PlatformLabel) -> Pick {
        if let Some(node) = self.find_target(dom, label) {
            return Pick::Matched(node);
        }

        // Apple silicon never gets the backup button, only an Intel build
        if label == PlatformLabel::MacOsAppleSilicon {
            return match self.find_target(dom, PlatformLabel::MacOs) {
                Some(node) => {
                    debug!("No native build for {}, offering Intel macOS", label);
                    Pick::MacFallback(node)
                }
                None => {
                    debug!("No macOS build for {}", label);
                    Pick::Nothing
                }
            };
        }

        match dom.query(None, &Selector::class(&self.markup.backup_class)) {
            Some(node) => Pick::Backup(node),
            None => {
                debug!("No download available for {}", label);
                Pick::Nothing
            }
        }
    }

    #[tracing::instrument(skip(self, dom))]
    fn reveal(&self, dom: &mut dyn Dom, label: PlatformLabel) -> Pick {
        let pick = self.pick(dom, label);
        if let Some(node) = pick.node() {
            Mutation::Show(node).apply(dom, &self.markup);
        }
        pick
    }
}
