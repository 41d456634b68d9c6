//! Lightweight document object model.
//!
//! domlite provides:
//! - **Arena DOM**: elements and text nodes in an `indextree` arena, addressed by
//!   document-scoped `NodeId`s
//! - **Attributes**: ordered, unique by qualified name, with `xml`/`xmlns` prefix handling
//! - **Class lists and inline styles**: ordered token sets and property maps per element
//! - **Serialization**: compact tag text with optional indentation
//! - **Snapshots**: owned, `facet`-reflectable copies of subtrees
//!
//! # Example
//!
//! ```rust
//! use domlite::Document;
//!
//! let mut doc = Document::new(Some("urn:test"), "sheet");
//! let row = doc.create_element("row");
//! let cell = doc.create_element("cell");
//! doc.set_attribute(cell, "ref", "r1c1")?;
//! doc.element_mut(cell).unwrap().text_content = Some("abc".into());
//! doc.append_child(row, cell)?;
//! doc.append_child(doc.document_element(), row)?;
//!
//! assert_eq!(
//!     doc.to_string(),
//!     r#"<sheet xmlns="urn:test"><row><cell ref="r1c1">abc</cell></row></sheet>"#
//! );
//! # Ok::<(), domlite::DomError>(())
//! ```

mod tracing_macros;

pub mod attr;
pub mod class_list;
mod document;
pub mod error;
pub mod namespace;
pub mod node;
mod node_id;
pub mod serialize;
pub mod snapshot;
pub mod style;

pub use attr::{Attr, NamedNodeMap};
pub use class_list::ClassList;
pub use document::Document;
pub use error::{DomError, Result};
pub use namespace::{ContentType, XML_NAMESPACE, XMLNS_NAMESPACE};
pub use node::{ElementData, EventRegistration, NodeData, NodeKind, TextData};
pub use node_id::NodeId;
pub use serialize::{NodeDisplay, SerializeOptions, serialize_document, serialize_node};
pub use snapshot::{ElementSnapshot, NodeSnapshot};
pub use style::StyleDeclaration;
