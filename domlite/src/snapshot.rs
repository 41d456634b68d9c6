//! Owned snapshots of arena subtrees.
//!
//! A [`NodeSnapshot`] is a plain recursive value: no arena, no ids. Two
//! subtrees are structurally equal exactly when their snapshots compare
//! equal, which is what most assertions about a tree want. Snapshots derive
//! `Facet`, so any facet format crate can export them.

use facet::Facet;
use indexmap::IndexMap;

use crate::attr::{Attr, NamedNodeMap};
use crate::document::Document;
use crate::node::{ElementData, NodeData, NodeKind};
use crate::node_id::NodeId;

/// Element or text, owned.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum NodeSnapshot {
    Element(ElementSnapshot),
    Text(String),
}

/// Owned copy of an element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
pub struct ElementSnapshot {
    pub name: String,
    pub namespace_uri: Option<String>,
    pub id: String,
    pub text_content: Option<String>,
    pub attributes: Vec<Attr>,
    pub classes: Vec<String>,
    pub style: IndexMap<String, String>,
    pub children: Vec<NodeSnapshot>,
}

impl ElementSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attr::new(name, value));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<NodeSnapshot>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl From<ElementSnapshot> for NodeSnapshot {
    fn from(elem: ElementSnapshot) -> Self {
        NodeSnapshot::Element(elem)
    }
}

impl Document {
    /// Capture `id` and everything below it.
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let elem = match &self.get(id)?.kind {
            NodeKind::Text(text) => return Some(NodeSnapshot::Text(text.value.clone())),
            NodeKind::Element(elem) => elem,
        };

        // Each frame is an element still collecting its children.
        let mut open = vec![(element_snapshot(elem), self.child_nodes(id))];
        loop {
            let (_, children) = open.last_mut()?;
            match children.next() {
                Some(child) => match &self.get(child)?.kind {
                    NodeKind::Text(text) => {
                        let (parent, _) = open.last_mut()?;
                        parent.children.push(NodeSnapshot::Text(text.value.clone()));
                    }
                    NodeKind::Element(elem) => {
                        open.push((element_snapshot(elem), self.child_nodes(child)));
                    }
                },
                None => {
                    let (done, _) = open.pop()?;
                    match open.last_mut() {
                        Some((parent, _)) => parent.children.push(done.into()),
                        None => return Some(done.into()),
                    }
                }
            }
        }
    }

    /// Build a detached subtree from `snapshot` and return its root.
    pub fn instantiate(&mut self, snapshot: &NodeSnapshot) -> NodeId {
        let root = self.new_node(node_data(snapshot), None);
        let mut pending = vec![(snapshot, root)];
        while let Some((snapshot, id)) = pending.pop() {
            if let NodeSnapshot::Element(elem) = snapshot {
                for child in &elem.children {
                    let child_id = self.new_node(node_data(child), Some(id));
                    pending.push((child, child_id));
                }
            }
        }
        root
    }
}

/// Everything but the children.
fn element_snapshot(elem: &ElementData) -> ElementSnapshot {
    ElementSnapshot {
        name: elem.name().to_string(),
        namespace_uri: elem.namespace_uri().map(str::to_string),
        id: elem.id.clone(),
        text_content: elem.text_content.clone(),
        attributes: elem.attributes.iter().cloned().collect(),
        classes: elem.class_list.iter().map(str::to_string).collect(),
        style: elem
            .style
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: Vec::new(),
    }
}

fn node_data(snapshot: &NodeSnapshot) -> NodeData {
    match snapshot {
        NodeSnapshot::Text(text) => NodeData::text(text.as_str()),
        NodeSnapshot::Element(snap) => {
            let mut elem = ElementData::new(snap.name.as_str(), snap.namespace_uri.clone());
            elem.id = snap.id.clone();
            elem.text_content = snap.text_content.clone();
            elem.attributes = snap.attributes.iter().cloned().collect::<NamedNodeMap>();
            elem.class_list.add(&snap.classes);
            for (name, value) in &snap.style {
                elem.style.set(name, value.as_str());
            }
            NodeData::element(elem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn sample(doc: &mut Document) -> NodeId {
        let row = doc.create_element_ns(Some("urn:t"), "row");
        doc.element_mut(row).unwrap().id = "r1".into();
        doc.set_attribute(row, "ref", "r1").unwrap();
        doc.class_list_mut(row).unwrap().add(["a", "b"]);
        doc.style_mut(row).unwrap().set("color", "red");
        let cell = doc.create_element("cell");
        doc.element_mut(cell).unwrap().text_content = Some("abc".into());
        doc.append_child(row, cell).unwrap();
        let txt = doc.create_text_node("tail");
        doc.append_child(row, txt).unwrap();
        row
    }

    #[test]
    fn test_snapshot_captures_subtree() {
        let mut doc = Document::new(None, "root");
        let row = sample(&mut doc);

        let expected = NodeSnapshot::Element(ElementSnapshot {
            name: "row".into(),
            namespace_uri: Some("urn:t".into()),
            id: "r1".into(),
            text_content: None,
            attributes: vec![Attr::new("ref", "r1")],
            classes: vec!["a".into(), "b".into()],
            style: [("color".to_string(), "red".to_string())].into_iter().collect(),
            children: vec![
                ElementSnapshot::new("cell").with_text("abc").into(),
                NodeSnapshot::Text("tail".into()),
            ],
        });
        assert_eq!(doc.snapshot(row), Some(expected));
    }

    #[test]
    fn test_instantiate_roundtrip() {
        let mut doc = Document::new(None, "root");
        let row = sample(&mut doc);
        let snap = doc.snapshot(row).unwrap();

        let mut other = Document::new(None, "other");
        let copy = other.instantiate(&snap);
        assert_eq!(other.snapshot(copy), Some(snap));
        assert_eq!(other.display(copy).to_string(), doc.display(row).to_string());
    }

    #[test]
    fn test_snapshot_unknown_node() {
        let mut big = Document::new(None, "root");
        let far = (0..4).map(|_| big.create_element("x")).last().unwrap();
        let small = Document::new(None, "root");
        assert_eq!(small.snapshot(far), None);
    }

    #[test]
    fn test_instantiate_keeps_child_order() {
        let snap: NodeSnapshot = ElementSnapshot::new("table")
            .with_child(
                ElementSnapshot::new("row")
                    .with_attr("n", "1")
                    .with_child(ElementSnapshot::new("cell").with_text("a"))
                    .with_child(ElementSnapshot::new("cell").with_text("b")),
            )
            .with_child(NodeSnapshot::Text("gap".into()))
            .with_child(ElementSnapshot::new("row").with_attr("n", "2"))
            .into();

        let mut doc = Document::new(None, "root");
        let table = doc.instantiate(&snap);
        assert_eq!(doc.parent_node(table), None);
        assert_eq!(doc.child_count(table), 3);
        assert_eq!(
            doc.display(table).to_string(),
            r#"<table><row n="1"><cell>a</cell><cell>b</cell></row>gap<row n="2"/></table>"#
        );
        assert_eq!(doc.snapshot(table), Some(snap));
    }

    #[test]
    fn test_snapshot_of_text_node() {
        let mut doc = Document::new(None, "root");
        let txt = doc.create_text_node("loose");
        assert_eq!(doc.snapshot(txt), Some(NodeSnapshot::Text("loose".into())));
        let copy = doc.instantiate(&NodeSnapshot::Text("loose".into()));
        assert_eq!(doc.node_value(copy), Some("loose"));
    }
}
