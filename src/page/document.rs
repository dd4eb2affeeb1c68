use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::dom::{Dom, NodeId, Selector};

/// Serialized form of an element tree (page JSON)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the prefix
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    classes: Vec<String>,
    data: BTreeMap<String, String>,
    value: Option<String>,
    children: Vec<NodeId>,
}

/// In-memory document. Nodes are stored in document order.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        let mut doc = Document { nodes: Vec::new() };
        doc.push(root);
        doc
    }

    fn push(&mut self, element: Element) -> NodeId {
        let node_id = NodeId(self.nodes.len());
        let mut classes: Vec<String> = Vec::with_capacity(element.classes.len());
        for class in element.classes {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        self.nodes.push(Node {
            id: element.id,
            classes,
            data: element.data,
            value: element.value,
            children: Vec::new(),
        });

        for child in element.children {
            let child_id = self.push(child);
            self.nodes[node_id.0].children.push(child_id);
        }
        node_id
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let root: Element = serde_json::from_str(json).context("Failed to parse page")?;
        Ok(Self::new(root))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid page file {:?}", path))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Rebuild the serializable tree, reflecting every mutation so far
    pub fn to_element(&self) -> Element {
        self.element_at(self.root())
    }

    fn element_at(&self, node_id: NodeId) -> Element {
        let node = &self.nodes[node_id.0];
        Element {
            id: node.id.clone(),
            classes: node.classes.clone(),
            data: node.data.clone(),
            value: node.value.clone(),
            children: node.children.iter().map(|c| self.element_at(*c)).collect(),
        }
    }

    pub fn classes(&self, node_id: NodeId) -> &[String] {
        self.node(node_id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id.0)
    }

    fn matches(&self, node_id: NodeId, selector: &Selector) -> bool {
        let Some(node) = self.node(node_id) else {
            return false;
        };
        selector.matches(
            node.id.as_deref(),
            |class| node.classes.iter().any(|c| c == class),
            |name| node.data.get(name).map(String::as_str),
        )
    }

    fn collect_descendants(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.node(node_id) {
            for child in &node.children {
                out.push(*child);
                self.collect_descendants(*child, out);
            }
        }
    }
}

impl Dom for Document {
    fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let candidates: Vec<NodeId> = match scope {
            None => (0..self.nodes.len()).map(NodeId).collect(),
            Some(scope) => {
                let mut out = Vec::new();
                self.collect_descendants(scope, &mut out);
                out
            }
        };

        candidates
            .into_iter()
            .filter(|n| self.matches(*n, selector))
            .collect()
    }

    fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.node(node_id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node_id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(node_id.0) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node_id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(node_id.0) {
            node.classes.retain(|c| c != class);
        }
    }

    fn data(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.node(node_id).and_then(|n| n.data.get(name).cloned())
    }

    fn value(&self, node_id: NodeId) -> Option<String> {
        self.node(node_id).and_then(|n| n.value.clone())
    }

    fn set_value(&mut self, node_id: NodeId, value: &str) {
        if let Some(node) = self.nodes.get_mut(node_id.0) {
            node.value = Some(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(
            Element::new()
                .with_child(
                    Element::new()
                        .with_class("arch")
                        .with_data("arch", "x86_64")
                        .with_child(Element::new().with_class("install-tab").with_data("id", "shell"))
                        .with_child(Element::new().with_class("install-tab").with_data("id", "msi")),
                )
                .with_child(
                    Element::new()
                        .with_class("arch")
                        .with_class("hidden")
                        .with_data("arch", "aarch64")
                        .with_child(Element::new().with_class("install-tab").with_data("id", "shell")),
                ),
        )
    }

    #[test]
    fn test_query_walks_document_order() {
        let doc = sample();
        let tabs = doc.query_all(None, &Selector::class("install-tab"));

        assert_eq!(tabs.len(), 3);
        assert_eq!(doc.data(tabs[0], "id").as_deref(), Some("shell"));
        assert_eq!(doc.data(tabs[1], "id").as_deref(), Some("msi"));
        assert!(tabs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_scoped_query_excludes_scope_and_siblings() {
        let doc = sample();
        let group = doc
            .query(None, &Selector::class("arch").data_eq("arch", "aarch64"))
            .unwrap();

        let tabs = doc.query_all(Some(group), &Selector::class("install-tab"));
        assert_eq!(tabs.len(), 1);
        assert!(doc.query(Some(group), &Selector::class("arch")).is_none());
    }

    #[test]
    fn test_class_mutations() {
        let mut doc = sample();
        let visible = doc
            .query(None, &Selector::class("arch").without_class("hidden"))
            .unwrap();

        doc.add_class(visible, "hidden");
        doc.add_class(visible, "hidden");
        assert_eq!(
            doc.classes(visible)
                .iter()
                .filter(|c| c.as_str() == "hidden")
                .count(),
            1
        );

        doc.remove_class(visible, "hidden");
        assert!(!doc.has_class(visible, "hidden"));
    }

    #[test]
    fn test_out_of_range_nodes_are_ignored() {
        let mut doc = sample();
        let bogus = NodeId(999);

        doc.add_class(bogus, "hidden");
        doc.set_value(bogus, "x");
        assert!(!doc.has_class(bogus, "hidden"));
        assert_eq!(doc.value(bogus), None);
        assert!(doc.query_all(Some(bogus), &Selector::class("arch")).is_empty());
    }

    #[test]
    fn test_json_round_trip_reflects_mutations() {
        let mut doc = Document::from_json(
            r#"{"children": [{"id": "install-arch-select", "value": "x86_64"},
                             {"classes": ["arch"], "data": {"arch": "x86_64"}}]}"#,
        )
        .unwrap();

        let select = doc.query(None, &Selector::id("install-arch-select")).unwrap();
        doc.set_value(select, "aarch64");

        let element = doc.to_element();
        assert_eq!(element.children[0].value.as_deref(), Some("aarch64"));
        assert_eq!(element.children[1].data.get("arch").map(String::as_str), Some("x86_64"));
    }

    #[test]
    fn test_duplicate_classes_collapse() {
        let doc = Document::new(Element::new().with_class("tab").with_class("tab"));
        assert_eq!(doc.classes(doc.root()), &["tab".to_string()]);
    }
}
