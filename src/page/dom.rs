//! Minimal DOM surface the page controllers need.

/// Handle to an element in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A compound selector: every condition must hold.
///
/// Covers the subset of CSS the controllers use, e.g.
/// `.install-content[data-triple=x][data-id]:not(.hidden)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    id: Option<String>,
    classes: Vec<String>,
    excluded_classes: Vec<String>,
    /// `(name, None)` means "attribute present"
    data: Vec<(String, Option<String>)>,
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Default::default()
        }
    }

    pub fn and_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// `:not(.class)`
    pub fn without_class(mut self, class: impl Into<String>) -> Self {
        self.excluded_classes.push(class.into());
        self
    }

    /// `[data-name]`
    pub fn has_data(mut self, name: impl Into<String>) -> Self {
        self.data.push((name.into(), None));
        self
    }

    /// `[data-name=value]`
    pub fn data_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((name.into(), Some(value.into())));
        self
    }

    /// Check the selector against one element's properties
    pub fn matches<'a>(
        &self,
        id: Option<&str>,
        has_class: impl Fn(&str) -> bool,
        data: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        if self.id.as_deref().is_some_and(|wanted| id != Some(wanted)) {
            return false;
        }

        if !self.classes.iter().all(|c| has_class(c)) {
            return false;
        }

        if self.excluded_classes.iter().any(|c| has_class(c)) {
            return false;
        }

        self.data.iter().all(|(name, value)| match (data(name), value) {
            (Some(actual), Some(expected)) => actual == expected.as_str(),
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

/// Document access used by the toggler and the download picker.
///
/// Queries walk in document order. With `scope` set, only descendants of that
/// element are searched (the element itself is excluded), like
/// `Element.querySelector`.
pub trait Dom {
    fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId>;

    fn query(&self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Value of the `data-<name>` attribute
    fn data(&self, node: NodeId, name: &str) -> Option<String>;

    /// Current value of a form control
    fn value(&self, node: NodeId) -> Option<String>;
    fn set_value(&mut self, node: NodeId, value: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn matches(selector: &Selector, id: Option<&str>, classes: &[&str], data: &[(&str, &str)]) -> bool {
        let data: HashMap<&str, &str> = data.iter().copied().collect();
        selector.matches(id, |c| classes.iter().any(|k| *k == c), |name| data.get(name).copied())
    }

    #[test]
    fn test_class_and_not_class() {
        let visible = Selector::class("arch").has_data("arch").without_class("hidden");

        assert!(matches(&visible, None, &["arch"], &[("arch", "x86_64")]));
        assert!(!matches(&visible, None, &["arch", "hidden"], &[("arch", "x86_64")]));
        assert!(!matches(&visible, None, &["arch"], &[]));
        assert!(!matches(&visible, None, &["install-tab"], &[("arch", "x86_64")]));
    }

    #[test]
    fn test_data_equality() {
        let selector = Selector::class("install-content")
            .data_eq("id", "shell")
            .data_eq("triple", "x86_64-pc-windows-msvc");

        assert!(matches(
            &selector,
            None,
            &["install-content"],
            &[("id", "shell"), ("triple", "x86_64-pc-windows-msvc")]
        ));
        assert!(!matches(
            &selector,
            None,
            &["install-content"],
            &[("id", "shell"), ("triple", "aarch64-apple-darwin")]
        ));
    }

    #[test]
    fn test_id_selector() {
        let selector = Selector::id("install-arch-select");
        assert!(matches(&selector, Some("install-arch-select"), &[], &[]));
        assert!(!matches(&selector, Some("other"), &[], &[]));
        assert!(!matches(&selector, None, &[], &[]));
    }
}
