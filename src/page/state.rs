//! Pure visibility transitions for panel groups.
//!
//! The toggler looks up the relevant elements, describes what it found with
//! the types below, and applies the returned [`Mutation`]s. Nothing here
//! touches a document.

use super::dom::{Dom, NodeId};
use crate::config::Markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Show(NodeId),
    Hide(NodeId),
    Select(NodeId),
    Deselect(NodeId),
}

impl Mutation {
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::Show(n) | Mutation::Hide(n) | Mutation::Select(n) | Mutation::Deselect(n) => {
                *n
            }
        }
    }

    pub fn apply(&self, dom: &mut dyn Dom, markup: &Markup) {
        match self {
            Mutation::Show(n) => dom.remove_class(*n, &markup.hidden_class),
            Mutation::Hide(n) => dom.add_class(*n, &markup.hidden_class),
            Mutation::Select(n) => dom.add_class(*n, &markup.selected_class),
            Mutation::Deselect(n) => dom.remove_class(*n, &markup.selected_class),
        }
    }
}

/// First tab and content panel of a group that has never been shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupInit {
    pub first_panel: Option<NodeId>,
    pub first_tab: Option<NodeId>,
}

/// Reveal architecture group `target`, hiding whichever group is `visible`.
///
/// `init` is given when the target group has no selected tab yet.
pub fn change_arch(visible: Option<NodeId>, target: NodeId, init: Option<GroupInit>) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    if let Some(old) = visible.filter(|old| *old != target) {
        mutations.push(Mutation::Hide(old));
    }

    if visible != Some(target) {
        mutations.push(Mutation::Show(target));
    }

    if let Some(init) = init {
        if let Some(panel) = init.first_panel {
            mutations.push(Mutation::Show(panel));
        }
        if let Some(tab) = init.first_tab {
            mutations.push(Mutation::Select(tab));
        }
    }

    mutations
}

/// What one triple's tab group currently shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabGroup {
    pub selected_tab: Option<NodeId>,
    pub visible_panel: Option<NodeId>,
}

impl TabGroup {
    /// Switch the group to `tab` and its `panel`.
    ///
    /// The previous panel is hidden and the previous tab deselected only when
    /// both are known.
    pub fn select(&self, tab: NodeId, panel: NodeId) -> (TabGroup, Vec<Mutation>) {
        let mut mutations = Vec::new();

        if let (Some(old_panel), Some(old_tab)) = (self.visible_panel, self.selected_tab) {
            if old_panel != panel {
                mutations.push(Mutation::Hide(old_panel));
            }
            if old_tab != tab {
                mutations.push(Mutation::Deselect(old_tab));
            }
        }

        if self.visible_panel != Some(panel) {
            mutations.push(Mutation::Show(panel));
        }
        if self.selected_tab != Some(tab) {
            mutations.push(Mutation::Select(tab));
        }

        let next = TabGroup {
            selected_tab: Some(tab),
            visible_panel: Some(panel),
        };
        (next, mutations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: NodeId = NodeId(1);
    const B: NodeId = NodeId(2);
    const PANEL: NodeId = NodeId(3);
    const TAB: NodeId = NodeId(4);

    #[test]
    fn test_change_arch_hides_previous_and_shows_target() {
        let mutations = change_arch(Some(A), B, None);
        assert_eq!(mutations, vec![Mutation::Hide(A), Mutation::Show(B)]);
    }

    #[test]
    fn test_change_arch_without_visible_group() {
        let mutations = change_arch(None, B, None);
        assert_eq!(mutations, vec![Mutation::Show(B)]);
    }

    #[test]
    fn test_change_arch_initializes_fresh_group() {
        let init = GroupInit {
            first_panel: Some(PANEL),
            first_tab: Some(TAB),
        };
        let mutations = change_arch(Some(A), B, Some(init));
        assert_eq!(
            mutations,
            vec![
                Mutation::Hide(A),
                Mutation::Show(B),
                Mutation::Show(PANEL),
                Mutation::Select(TAB),
            ]
        );
    }

    #[test]
    fn test_change_arch_to_visible_group_is_quiet() {
        assert!(change_arch(Some(B), B, None).is_empty());
    }

    #[test]
    fn test_change_arch_partial_init() {
        let init = GroupInit {
            first_panel: None,
            first_tab: Some(TAB),
        };
        assert_eq!(
            change_arch(None, B, Some(init)),
            vec![Mutation::Show(B), Mutation::Select(TAB)]
        );
    }

    #[test]
    fn test_tab_select_swaps_panel_and_tab() {
        let group = TabGroup {
            selected_tab: Some(NodeId(10)),
            visible_panel: Some(NodeId(11)),
        };

        let (next, mutations) = group.select(TAB, PANEL);

        assert_eq!(
            mutations,
            vec![
                Mutation::Hide(NodeId(11)),
                Mutation::Deselect(NodeId(10)),
                Mutation::Show(PANEL),
                Mutation::Select(TAB),
            ]
        );
        assert_eq!(next.selected_tab, Some(TAB));
        assert_eq!(next.visible_panel, Some(PANEL));
    }

    #[test]
    fn test_tab_reselect_is_idempotent() {
        let group = TabGroup {
            selected_tab: Some(TAB),
            visible_panel: Some(PANEL),
        };

        let (next, mutations) = group.select(TAB, PANEL);
        assert!(mutations.is_empty());
        assert_eq!(next, group);
    }

    #[test]
    fn test_tab_select_keeps_old_panel_when_no_tab_was_selected() {
        let group = TabGroup {
            selected_tab: None,
            visible_panel: Some(NodeId(11)),
        };

        let (_, mutations) = group.select(TAB, PANEL);
        assert_eq!(mutations, vec![Mutation::Show(PANEL), Mutation::Select(TAB)]);
    }

    #[test]
    fn test_mutation_node() {
        assert_eq!(Mutation::Deselect(TAB).node(), TAB);
        assert_eq!(Mutation::Show(PANEL).node(), PANEL);
    }
}
