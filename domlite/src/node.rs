//! Per-node payloads stored in the document arena.

use compact_str::CompactString;

use crate::attr::NamedNodeMap;
use crate::class_list::ClassList;
use crate::style::StyleDeclaration;

/// Name reported for every text node.
pub const TEXT_NODE_NAME: &str = "#text";

/// Data stored in each arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
}

/// Element or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(TextData),
}

impl NodeData {
    pub fn element(data: ElementData) -> Self {
        Self {
            kind: NodeKind::Element(data),
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(TextData { value: data.into() }),
        }
    }

    pub fn node_name(&self) -> &str {
        match &self.kind {
            NodeKind::Element(elem) => elem.name(),
            NodeKind::Text(_) => TEXT_NODE_NAME,
        }
    }

    pub fn node_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(elem) => elem.node_value.as_deref(),
            NodeKind::Text(text) => Some(&text.value),
        }
    }

    /// Text nodes have no `text_content` of their own.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(elem) => elem.text_content.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }
}

/// A recorded `add_event_listener` call. Nothing is ever dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRegistration {
    pub event_type: CompactString,
    pub use_capture: bool,
}

/// Element payload.
///
/// Name and namespace are fixed at creation; children live in the arena and
/// are reached through [`Document`](crate::Document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    namespace_uri: Option<String>,
    /// Plain `id`, empty by default.
    pub id: String,
    pub node_value: Option<String>,
    /// Leading text payload, written before any children when serialized.
    pub text_content: Option<String>,
    pub attributes: NamedNodeMap,
    pub class_list: ClassList,
    pub style: StyleDeclaration,
    pub listeners: Vec<EventRegistration>,
}

impl ElementData {
    pub fn new(name: impl Into<String>, namespace_uri: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace_uri,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Whether `text_content` is set and non-empty.
    pub fn has_text(&self) -> bool {
        self.text_content.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Copy of the scalar fields only: no attributes, classes, styles, or
    /// listeners.
    pub fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            namespace_uri: self.namespace_uri.clone(),
            id: self.id.clone(),
            node_value: self.node_value.clone(),
            text_content: self.text_content.clone(),
            ..Default::default()
        }
    }

    /// Copy of everything but the listeners.
    pub fn deep_clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            class_list: self.class_list.clone(),
            style: self.style.clone(),
            ..self.shallow_clone()
        }
    }
}

/// Text node payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextData {
    pub value: String,
}
