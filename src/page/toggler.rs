use log::{debug, warn};

use super::clipboard::Clipboard;
use super::dom::{Dom, NodeId, Selector};
use super::state::{GroupInit, Mutation, TabGroup, change_arch};
use crate::config::Markup;

/// A user interaction on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Change(NodeId),
    Click(NodeId),
}

/// Elements the toggler listens on, found when the page is ready
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub arch_select: Option<NodeId>,
    pub tabs: Vec<NodeId>,
    pub prerelease_toggle: Option<NodeId>,
    pub copy_buttons: Vec<NodeId>,
}

/// Keeps one architecture group, and one tab per group, visible.
pub struct Toggler {
    markup: Markup,
    bindings: Bindings,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl Toggler {
    /// Bind to the selector, tab buttons, pre-release checkbox and copy
    /// buttons of `dom`
    pub fn hydrate(dom: &dyn Dom, markup: Markup) -> Self {
        let arch_select = dom.query(None, &Selector::id(&markup.arch_select_id));
        let tabs = dom.query_all(
            None,
            &Selector::class(&markup.tab_class).has_data(&markup.id_attr),
        );
        let prerelease_toggle = dom.query(None, &Selector::id(&markup.prerelease_toggle_id));
        let copy_buttons = dom.query_all(None, &Selector::default().has_data(&markup.copy_attr));

        debug!(
            "Hydrated page: selector={:?}, {} tab(s), prerelease toggle={:?}, {} copy button(s)",
            arch_select,
            tabs.len(),
            prerelease_toggle,
            copy_buttons.len()
        );

        Self {
            markup,
            bindings: Bindings {
                arch_select,
                tabs,
                prerelease_toggle,
                copy_buttons,
            },
            clipboard: None,
        }
    }

    /// Send copy button clicks to `clipboard`
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Route an event to its handler. Returns the mutations applied.
    #[tracing::instrument(skip(self, dom))]
    pub fn dispatch(&self, dom: &mut dyn Dom, event: Event) -> Vec<Mutation> {
        let mutations = match event {
            Event::Change(target) if self.bindings.arch_select == Some(target) => {
                match dom.value(target) {
                    Some(arch) => self.arch_change(dom, &arch),
                    None => Vec::new(),
                }
            }
            Event::Click(target) if self.bindings.tabs.contains(&target) => {
                self.tab_click(dom, target)
            }
            Event::Click(target) if self.bindings.prerelease_toggle == Some(target) => {
                self.prerelease_toggle(dom)
            }
            Event::Click(target) if self.bindings.copy_buttons.contains(&target) => {
                self.copy_click(dom, target);
                Vec::new()
            }
            _ => {
                debug!("No handler bound for {:?}", event);
                Vec::new()
            }
        };

        for mutation in &mutations {
            mutation.apply(dom, &self.markup);
        }
        mutations
    }

    /// Set the selector to `arch` and fire its change event.
    ///
    /// `None` when the page has no selector.
    pub fn choose_arch(&self, dom: &mut dyn Dom, arch: &str) -> Option<Vec<Mutation>> {
        let Some(select) = self.bindings.arch_select else {
            debug!("No architecture selector on page");
            return None;
        };
        dom.set_value(select, arch);
        Some(self.dispatch(dom, Event::Change(select)))
    }

    /// Click the tab button identified by `triple` and `id`.
    ///
    /// `None` when no bound tab carries that triple and id.
    pub fn click_tab(&self, dom: &mut dyn Dom, triple: &str, id: &str) -> Option<Vec<Mutation>> {
        let tab = self.bindings.tabs.iter().copied().find(|tab| {
            dom.data(*tab, &self.markup.triple_attr).as_deref() == Some(triple)
                && dom.data(*tab, &self.markup.id_attr).as_deref() == Some(id)
        });

        match tab {
            Some(tab) => Some(self.dispatch(dom, Event::Click(tab))),
            None => {
                debug!("No tab with triple={} id={}", triple, id);
                None
            }
        }
    }

    /// Click the pre-release checkbox, if the page has one
    pub fn toggle_prereleases(&self, dom: &mut dyn Dom) -> Option<Vec<Mutation>> {
        let toggle = self.bindings.prerelease_toggle?;
        Some(self.dispatch(dom, Event::Click(toggle)))
    }

    /// Click the `index`-th copy button in document order
    pub fn click_copy(&self, dom: &mut dyn Dom, index: usize) -> Option<Vec<Mutation>> {
        let Some(button) = self.bindings.copy_buttons.get(index).copied() else {
            debug!("No copy button #{}", index);
            return None;
        };
        Some(self.dispatch(dom, Event::Click(button)))
    }

    fn arch_change(&self, dom: &dyn Dom, arch: &str) -> Vec<Mutation> {
        let m = &self.markup;

        let Some(target) = dom.query(
            None,
            &Selector::class(&m.arch_class).data_eq(&m.arch_attr, arch),
        ) else {
            debug!("No installer group for architecture {}", arch);
            return Vec::new();
        };

        let visible = dom.query(
            None,
            &Selector::class(&m.arch_class)
                .has_data(&m.arch_attr)
                .without_class(&m.hidden_class),
        );

        let has_selection = dom
            .query(
                Some(target),
                &Selector::class(&m.tab_class).and_class(&m.selected_class),
            )
            .is_some();

        let init = (!has_selection).then(|| GroupInit {
            first_panel: dom.query(Some(target), &Selector::class(&m.content_class)),
            first_tab: dom.query(Some(target), &Selector::class(&m.tab_class)),
        });

        change_arch(visible, target, init)
    }

    fn tab_click(&self, dom: &dyn Dom, tab: NodeId) -> Vec<Mutation> {
        let m = &self.markup;

        // Tabs without a triple are decorative
        let Some(triple) = dom.data(tab, &m.triple_attr).filter(|t| !t.is_empty()) else {
            return Vec::new();
        };
        let id = dom.data(tab, &m.id_attr).unwrap_or_default();

        let Some(panel) = dom.query(
            None,
            &Selector::class(&m.content_class)
                .data_eq(&m.id_attr, id.as_str())
                .data_eq(&m.triple_attr, triple.as_str()),
        ) else {
            debug!("No content panel for triple={} id={}", triple, id);
            return Vec::new();
        };

        let group = TabGroup {
            visible_panel: dom.query(
                None,
                &Selector::class(&m.content_class)
                    .data_eq(&m.triple_attr, triple.as_str())
                    .has_data(&m.id_attr)
                    .without_class(&m.hidden_class),
            ),
            selected_tab: dom.query(
                None,
                &Selector::class(&m.tab_class)
                    .data_eq(&m.triple_attr, triple.as_str())
                    .and_class(&m.selected_class),
            ),
        };

        let (_, mutations) = group.select(tab, panel);
        mutations
    }

    fn prerelease_toggle(&self, dom: &dyn Dom) -> Vec<Mutation> {
        dom.query_all(None, &Selector::class(&self.markup.prerelease_class))
            .into_iter()
            .map(|node| {
                if dom.has_class(node, &self.markup.hidden_class) {
                    Mutation::Show(node)
                } else {
                    Mutation::Hide(node)
                }
            })
            .collect()
    }

    fn copy_click(&self, dom: &dyn Dom, button: NodeId) {
        let Some(text) = dom.data(button, &self.markup.copy_attr) else {
            return;
        };
        let Some(clipboard) = &self.clipboard else {
            debug!("No clipboard available, dropping {:?}", text);
            return;
        };
        if let Err(e) = clipboard.write_text(&text) {
            warn!("Failed to copy to clipboard: {:#}", e);
        }
    }
}
