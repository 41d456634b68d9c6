//! Document-scoped node handles.
//!
//! An `indextree` id is only an index into one arena, so an index minted by
//! one document can name an unrelated node in another. [`NodeId`] pairs that
//! index with the tag of the document that issued it, and every `Document`
//! operation checks the tag before touching its arena.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_TAG: AtomicU64 = AtomicU64::new(1);

/// Identity of one document instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DocumentTag(u64);

impl DocumentTag {
    pub(crate) fn next() -> Self {
        Self(NEXT_DOCUMENT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a node, valid only with the document that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    document: DocumentTag,
    index: indextree::NodeId,
}

impl NodeId {
    pub(crate) fn new(document: DocumentTag, index: indextree::NodeId) -> Self {
        Self { document, index }
    }

    /// The arena index, if this handle was issued by `document`.
    pub(crate) fn index_in(self, document: DocumentTag) -> Option<indextree::NodeId> {
        (self.document == document).then_some(self.index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@doc{}", self.index, self.document.0)
    }
}
