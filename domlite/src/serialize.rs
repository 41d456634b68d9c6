//! Tag-text serializer.
//!
//! The output is a compact XML/HTML-like form:
//!
//! - Attributes are written as `name="value"` in insertion order
//! - An element with neither text content nor children is self-closing (`<br/>`)
//! - Otherwise the text content comes first, then the children, then the end tag
//! - Text nodes are written verbatim
//!
//! Nothing is escaped. Callers that need well-formed markup must escape
//! values before putting them in the tree.

use std::fmt::{self, Write};

use crate::document::Document;
use crate::node::{ElementData, NodeKind};
use crate::node_id::NodeId;

/// Options for serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Per-level indentation. When set, every child goes on its own line.
    pub indent: Option<String>,
    /// Indentation already accumulated before the serialized node.
    pub current_indent: String,
}

static DEFAULT_OPTIONS: SerializeOptions = SerializeOptions {
    indent: None,
    current_indent: String::new(),
};

impl SerializeOptions {
    /// Single-line output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indentation.
    pub fn pretty(self) -> Self {
        self.with_indent("  ")
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    /// Start at an existing indentation level.
    pub fn at_indent(mut self, current_indent: impl Into<String>) -> Self {
        self.current_indent = current_indent.into();
        self
    }
}

/// Serialize the document's root element.
pub fn serialize_document(doc: &Document, opts: &SerializeOptions) -> String {
    serialize_node(doc, doc.document_element(), opts)
}

/// Serialize `id` and its subtree. Unknown ids produce an empty string.
pub fn serialize_node(doc: &Document, id: NodeId, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    let mut ser = Serializer::new(&mut out, doc, opts);
    // Writing into a String cannot fail.
    let _ = ser.write_node(id, &opts.current_indent);
    out
}

struct Serializer<'a, W: Write> {
    out: &'a mut W,
    doc: &'a Document,
    options: &'a SerializeOptions,
}

impl<'a, W: Write> Serializer<'a, W> {
    fn new(out: &'a mut W, doc: &'a Document, options: &'a SerializeOptions) -> Self {
        Self { out, doc, options }
    }

    fn write_node(&mut self, id: NodeId, current_indent: &str) -> fmt::Result {
        let doc = self.doc;
        match doc.get(id).map(|data| &data.kind) {
            Some(NodeKind::Element(elem)) => self.write_element(id, elem, current_indent),
            Some(NodeKind::Text(text)) => self.out.write_str(&text.value),
            None => Ok(()),
        }
    }

    fn write_element(&mut self, id: NodeId, elem: &ElementData, current_indent: &str) -> fmt::Result {
        let doc = self.doc;

        write!(self.out, "{current_indent}<{}", elem.name())?;
        for attr in &elem.attributes {
            write!(self.out, " {}=\"{}\"", attr.name(), attr.value())?;
        }

        let has_text = elem.has_text();
        let has_children = doc.first_child(id).is_some();
        if !has_text && !has_children {
            return self.out.write_str("/>");
        }

        self.out.write_char('>')?;
        if let Some(text) = elem.text_content.as_deref() {
            self.out.write_str(text)?;
        }

        match &self.options.indent {
            Some(indent) => {
                let child_indent = format!("{current_indent}{indent}");
                for child in doc.child_nodes(id) {
                    self.out.write_char('\n')?;
                    self.write_node(child, &child_indent)?;
                }
                if has_children {
                    write!(self.out, "\n{current_indent}")?;
                }
            }
            None => {
                for child in doc.child_nodes(id) {
                    self.write_node(child, "")?;
                }
            }
        }

        write!(self.out, "</{}>", elem.name())
    }
}

/// `Display` adapter returned by [`Document::display`].
#[derive(Clone, Copy, Debug)]
pub struct NodeDisplay<'a> {
    doc: &'a Document,
    id: NodeId,
    options: &'a SerializeOptions,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Serializer::new(f, self.doc, self.options).write_node(self.id, &self.options.current_indent)
    }
}

// =============================================================================
// Convenience methods on Document
// =============================================================================

impl Document {
    /// Serialize the root element on a single line.
    pub fn to_xml_string(&self) -> String {
        serialize_document(self, &DEFAULT_OPTIONS)
    }

    /// Serialize `id` with custom options.
    pub fn serialize_node(&self, id: NodeId, opts: &SerializeOptions) -> String {
        serialize_node(self, id, opts)
    }

    /// Serialize `id`, optionally indenting each nesting level by `indent`
    /// on top of `current_indent`.
    pub fn node_to_string(&self, id: NodeId, indent: Option<&str>, current_indent: Option<&str>) -> String {
        let opts = SerializeOptions {
            indent: indent.map(str::to_string),
            current_indent: current_indent.unwrap_or_default().to_string(),
        };
        serialize_node(self, id, &opts)
    }

    /// Lazily serialize `id` through `Display`.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        self.display_with(id, &DEFAULT_OPTIONS)
    }

    pub fn display_with<'a>(&'a self, id: NodeId, options: &'a SerializeOptions) -> NodeDisplay<'a> {
        NodeDisplay {
            doc: self,
            id,
            options,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(self.document_element()), f)
    }
}

// =============================================================================
// Tests
// =============================================================================
