//! Structural errors raised by tree mutations.
//!
//! Lookups never fail: a missing attribute, class token, or style property
//! comes back as `None`. Only operations whose precondition the caller broke
//! return a [`DomError`], and they do so before touching the tree.

use crate::node_id::NodeId;

/// A tree mutation whose precondition was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// `remove_child` was given a node that is not a child of the parent.
    #[error("the node to be removed is not a child of this node ({child} under {parent})")]
    NotFound {
        /// The parent that was searched.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },

    /// Child nodes cannot be appended to or removed from a text node.
    #[error("child nodes cannot be {op} a text node")]
    LeafNode {
        /// `"appended to"` or `"removed from"`.
        op: &'static str,
    },

    /// The node would become its own ancestor.
    #[error("cannot insert {child} into itself or one of its descendants")]
    HierarchyRequest {
        /// The node being inserted.
        child: NodeId,
    },

    /// An element-only operation was given a text node.
    #[error("{0} is not an element")]
    NotAnElement(NodeId),

    /// The id was issued by another document, or its node was dropped.
    #[error("{0} does not belong to this document")]
    ForeignNode(NodeId),

    /// `drop_node` would free the document element.
    #[error("{0} holds the document element and cannot be dropped")]
    DocumentElement(NodeId),
}

/// Result alias for tree mutations.
pub type Result<T, E = DomError> = std::result::Result<T, E>;
