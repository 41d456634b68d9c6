//! Arena-backed document.
//!
//! Every node a [`Document`] creates lives in its `indextree` arena and is
//! addressed by a [`NodeId`] tagged with that document. Sibling and parent
//! links belong to the arena, so `first_child` / `last_child` are always read
//! off the current child list rather than cached on the element. Detached
//! nodes (freshly created, cloned, or removed) stay in the arena until they
//! are dropped with [`Document::drop_node`] or the document goes away.

use indextree::{Arena, NodeId as ArenaId};

use crate::attr::{Attr, NamedNodeMap};
use crate::class_list::ClassList;
use crate::error::{DomError, Result};
use crate::namespace::{ContentType, well_known_namespace};
use crate::node::{ElementData, EventRegistration, NodeData, NodeKind, TextData};
use crate::node_id::{DocumentTag, NodeId};
use crate::style::StyleDeclaration;
use crate::tracing_macros::{debug, trace};

/// A document tree with a single root element.
#[derive(Debug)]
pub struct Document {
    tag: DocumentTag,
    arena: Arena<NodeData>,
    root: ArenaId,
    content_type: ContentType,
}

/// The copy gets its own tag: ids of the source do not resolve in it. Walk
/// the copy from [`Document::document_element`] to reach its nodes.
impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            tag: DocumentTag::next(),
            arena: self.arena.clone(),
            root: self.root,
            content_type: self.content_type,
        }
    }
}

impl Document {
    /// Create an XML document whose root is named `root_name`.
    ///
    /// With a namespace, the root is created in it and carries a matching
    /// `xmlns` attribute.
    pub fn new(namespace_uri: Option<&str>, root_name: &str) -> Self {
        Self::with_content_type(ContentType::Xml, namespace_uri, root_name)
    }

    pub fn with_content_type(
        content_type: ContentType,
        namespace_uri: Option<&str>,
        root_name: &str,
    ) -> Self {
        let mut arena = Arena::new();
        let mut root = ElementData::new(root_name, namespace_uri.map(str::to_string));
        if let Some(ns) = namespace_uri {
            root.attributes.set_named_item(Attr::new("xmlns", ns));
        }
        let root = arena.new_node(NodeData::element(root));

        Self {
            tag: DocumentTag::next(),
            arena,
            root,
            content_type,
        }
    }

    /// The root element.
    pub fn document_element(&self) -> NodeId {
        self.handle(self.root)
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Resolve `prefix` to a namespace.
    ///
    /// Only `xml` and `xmlns` are recognized; anything else answers with the
    /// root element's namespace. `xmlns:*` declarations further down the tree
    /// are not consulted.
    pub fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<&str> {
        if let Some(ns) = prefix.and_then(well_known_namespace) {
            return Some(ns);
        }
        self.arena[self.root]
            .get()
            .as_element()
            .and_then(ElementData::namespace_uri)
    }

    // =========================================================================
    // Factory
    // =========================================================================

    /// Create a detached element with no namespace.
    pub fn create_element(&mut self, qualified_name: &str) -> NodeId {
        self.create_element_ns(None, qualified_name)
    }

    /// Create a detached element in `namespace_uri`.
    pub fn create_element_ns(&mut self, namespace_uri: Option<&str>, qualified_name: &str) -> NodeId {
        let id = self.new_node(
            NodeData::element(ElementData::new(qualified_name, namespace_uri.map(str::to_string))),
            None,
        );
        trace!(%id, qualified_name, "created element");
        id
    }

    /// Create a detached text node.
    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.new_node(NodeData::text(data), None)
    }

    /// Create a detached attribute with an unset value.
    pub fn create_attribute(&self, qualified_name: &str) -> Attr {
        Attr::unset(None::<&str>, qualified_name)
    }

    pub fn create_attribute_ns(&self, namespace_uri: Option<&str>, qualified_name: &str) -> Attr {
        Attr::unset(namespace_uri, qualified_name)
    }

    /// Store `data` as a new node, appended to `parent` when one is given.
    ///
    /// `parent` must be a live element of this document; builders inside the
    /// crate only pass ids they have just created.
    pub(crate) fn new_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let index = self.arena.new_node(data);
        if let Some(parent) = parent.and_then(|parent| self.index(parent)) {
            parent.append(index, &mut self.arena);
        }
        self.handle(index)
    }

    // =========================================================================
    // Node access
    // =========================================================================

    fn handle(&self, index: ArenaId) -> NodeId {
        NodeId::new(self.tag, index)
    }

    /// Arena index of a live node issued by this document.
    fn index(&self, id: NodeId) -> Option<ArenaId> {
        id.index_in(self.tag)
            .filter(|&index| self.arena.get(index).is_some() && !index.is_removed(&self.arena))
    }

    fn resolve(&self, id: NodeId) -> Result<ArenaId> {
        self.index(id).ok_or(DomError::ForeignNode(id))
    }

    /// Whether `id` names a live node of this document.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.index(id).map(|index| self.arena[index].get())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let index = self.index(id)?;
        Some(self.arena[index].get_mut())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(NodeData::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(NodeData::as_element_mut)
    }

    pub fn text(&self, id: NodeId) -> Option<&TextData> {
        self.get(id).and_then(NodeData::as_text)
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextData> {
        self.get_mut(id).and_then(NodeData::as_text_mut)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(NodeData::is_element)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(NodeData::is_text)
    }

    /// Tag name for elements, `#text` for text nodes.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(NodeData::node_name)
    }

    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(NodeData::node_value)
    }

    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(NodeData::text_content)
    }

    pub fn namespace_uri(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(ElementData::namespace_uri)
    }

    /// Attributes of an element; text nodes have none.
    pub fn attributes(&self, id: NodeId) -> Option<&NamedNodeMap> {
        self.element(id).map(|elem| &elem.attributes)
    }

    pub fn attributes_mut(&mut self, id: NodeId) -> Option<&mut NamedNodeMap> {
        self.element_mut(id).map(|elem| &mut elem.attributes)
    }

    pub fn class_list(&self, id: NodeId) -> Option<&ClassList> {
        self.element(id).map(|elem| &elem.class_list)
    }

    pub fn class_list_mut(&mut self, id: NodeId) -> Option<&mut ClassList> {
        self.element_mut(id).map(|elem| &mut elem.class_list)
    }

    pub fn style(&self, id: NodeId) -> Option<&StyleDeclaration> {
        self.element(id).map(|elem| &elem.style)
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut StyleDeclaration> {
        self.element_mut(id).map(|elem| &mut elem.style)
    }

    /// Children of `id` in order. Empty for text nodes and unknown ids.
    pub fn child_nodes(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.index(id)
            .into_iter()
            .flat_map(move |index| index.children(&self.arena))
            .map(move |child| self.handle(child))
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.child_nodes(id).count()
    }

    /// Child at `index`, like `NodeList.item`.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.child_nodes(id).nth(index)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index(id)?;
        self.arena[index].first_child().map(|child| self.handle(child))
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index(id)?;
        self.arena[index].last_child().map(|child| self.handle(child))
    }

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index(id)?;
        self.arena[index].parent().map(|parent| self.handle(parent))
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Create or replace attribute `name` on element `id`.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<&Attr> {
        self.set_attribute_ns(id, None, name, value)
    }

    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        namespace_uri: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<&Attr> {
        let elem = self.element_for_update(id)?;
        Ok(elem
            .attributes
            .set_named_item(Attr::new_ns(namespace_uri, qualified_name, value)))
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id).and_then(|attrs| attrs.get(name))
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<Attr> {
        self.attributes_mut(id)
            .and_then(|attrs| attrs.remove_named_item(name))
    }

    /// Record a listener registration. Events are never dispatched; text
    /// nodes accept and drop the call.
    pub fn add_event_listener(&mut self, id: NodeId, event_type: &str, use_capture: bool) {
        if let Some(elem) = self.element_mut(id) {
            elem.listeners.push(EventRegistration {
                event_type: event_type.into(),
                use_capture,
            });
        }
    }

    fn element_for_update(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match self.get_mut(id) {
            Some(NodeData {
                kind: NodeKind::Element(elem),
            }) => Ok(elem),
            Some(_) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::ForeignNode(id)),
        }
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    /// Append `child` as the last child of `parent` and return it.
    ///
    /// A child that is already attached somewhere is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        let parent_index = self.resolve(parent)?;
        if self.arena[parent_index].get().is_text() {
            debug!(%parent, "append_child on a text node");
            return Err(DomError::LeafNode { op: "appended to" });
        }
        let child_index = self.resolve(child)?;
        if parent_index
            .ancestors(&self.arena)
            .any(|ancestor| ancestor == child_index)
        {
            debug!(%parent, %child, "append_child would create a cycle");
            return Err(DomError::HierarchyRequest { child });
        }

        parent_index
            .checked_append(child_index, &mut self.arena)
            .map_err(|_| DomError::HierarchyRequest { child })?;
        trace!(%parent, %child, "appended child");
        Ok(child)
    }

    /// Detach `child` from `parent` and return it.
    ///
    /// Fails without touching the tree if `child` is not currently a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        let parent_index = self.resolve(parent)?;
        if self.arena[parent_index].get().is_text() {
            debug!(%parent, "remove_child on a text node");
            return Err(DomError::LeafNode { op: "removed from" });
        }
        let Some(child_index) = self
            .index(child)
            .filter(|&index| self.arena[index].parent() == Some(parent_index))
        else {
            debug!(%parent, %child, "remove_child target is not a child");
            return Err(DomError::NotFound { parent, child });
        };

        child_index.detach(&mut self.arena);
        trace!(%parent, %child, "removed child");
        Ok(child)
    }

    /// Detach every child of `parent`.
    pub fn remove_children(&mut self, parent: NodeId) -> Result<()> {
        let parent_index = self.resolve(parent)?;
        let children: Vec<ArenaId> = parent_index.children(&self.arena).collect();
        for child in children {
            child.detach(&mut self.arena);
        }
        Ok(())
    }

    /// Free `id` and its whole subtree.
    ///
    /// The ids of dropped nodes stop resolving: every operation treats them
    /// as foreign afterwards. The document element, and any subtree holding
    /// it, cannot be dropped.
    pub fn drop_node(&mut self, id: NodeId) -> Result<()> {
        let index = self.resolve(id)?;
        if self.root.ancestors(&self.arena).any(|ancestor| ancestor == index) {
            debug!(%id, "drop_node would drop the document element");
            return Err(DomError::DocumentElement(id));
        }

        index.remove_subtree(&mut self.arena);
        trace!(%id, "dropped node");
        Ok(())
    }

    /// Copy `id` into a new detached node.
    ///
    /// A shallow copy keeps only name, namespace, id, node value, and text
    /// content. A deep copy also duplicates attributes, class tokens, style,
    /// and the whole child subtree. Listeners are never copied.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId> {
        let source = self.resolve(id)?;
        let copy = self.copy_one(source, deep);
        if deep {
            // Explicit stack, so depth is not limited by the call stack.
            let mut pending = vec![(source, copy)];
            while let Some((source, copy)) = pending.pop() {
                let children: Vec<ArenaId> = source.children(&self.arena).collect();
                for child in children {
                    let child_copy = self.copy_one(child, true);
                    copy.append(child_copy, &mut self.arena);
                    pending.push((child, child_copy));
                }
            }
        }
        Ok(self.handle(copy))
    }

    fn copy_one(&mut self, index: ArenaId, deep: bool) -> ArenaId {
        let data = match &self.arena[index].get().kind {
            NodeKind::Element(elem) if deep => NodeData::element(elem.deep_clone()),
            NodeKind::Element(elem) => NodeData::element(elem.shallow_clone()),
            NodeKind::Text(text) => NodeData::text(text.value.clone()),
        };
        self.arena.new_node(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{XML_NAMESPACE, XMLNS_NAMESPACE};
    use facet_testhelpers::test;

    fn children(doc: &Document, id: NodeId) -> Vec<NodeId> {
        doc.child_nodes(id).collect()
    }

    fn assert_ends(doc: &Document, id: NodeId) {
        let kids = children(doc, id);
        assert_eq!(doc.first_child(id), kids.first().copied());
        assert_eq!(doc.last_child(id), kids.last().copied());
    }

    #[test]
    fn test_new_document_root() {
        let doc = Document::new(Some("urn:test"), "sheet");
        let root = doc.document_element();
        assert_eq!(doc.node_name(root), Some("sheet"));
        assert_eq!(doc.namespace_uri(root), Some("urn:test"));
        assert_eq!(doc.get_attribute(root, "xmlns"), Some("urn:test"));
        assert_eq!(doc.content_type(), ContentType::Xml);

        let bare = Document::with_content_type(ContentType::Html, None, "html");
        assert!(bare.attributes(bare.document_element()).is_some_and(NamedNodeMap::is_empty));
        assert_eq!(bare.content_type().as_str(), "text/html");
    }

    #[test]
    fn test_lookup_namespace_uri() {
        let doc = Document::new(Some("urn:test"), "sheet");
        assert_eq!(doc.lookup_namespace_uri(Some("xml")), Some(XML_NAMESPACE));
        assert_eq!(doc.lookup_namespace_uri(Some("xmlns")), Some(XMLNS_NAMESPACE));
        assert_eq!(doc.lookup_namespace_uri(Some("x")), Some("urn:test"));
        assert_eq!(doc.lookup_namespace_uri(None), Some("urn:test"));

        let plain = Document::new(None, "root");
        assert_eq!(plain.lookup_namespace_uri(Some("x")), None);
        assert_eq!(plain.lookup_namespace_uri(Some("xml")), Some(XML_NAMESPACE));
    }

    #[test]
    fn test_create_nodes() {
        let mut doc = Document::new(None, "root");
        let div = doc.create_element("div");
        let svg = doc.create_element_ns(Some("http://www.w3.org/2000/svg"), "svg:rect");
        let txt = doc.create_text_node("abc");

        assert_eq!(doc.node_name(div), Some("div"));
        assert_eq!(doc.namespace_uri(div), None);
        assert_eq!(doc.namespace_uri(svg), Some("http://www.w3.org/2000/svg"));
        assert_eq!(doc.node_name(txt), Some("#text"));
        assert_eq!(doc.node_value(txt), Some("abc"));
        assert!(doc.attributes(txt).is_none());
        assert_eq!(doc.parent_node(div), None);
        assert_eq!(doc.child_count(div), 0);

        let attr = doc.create_attribute_ns(Some("urn:a"), "a:b");
        assert_eq!(attr.value(), "null");
        assert_eq!(attr.namespace_uri(), Some("urn:a"));
        assert_eq!(doc.create_attribute("c").namespace_uri(), None);
    }

    #[test]
    fn test_append_child_tracks_ends() {
        let mut doc = Document::new(None, "root");
        let div = doc.create_element("div");
        assert_eq!(doc.first_child(div), None);
        assert_eq!(doc.last_child(div), None);

        let span = doc.create_element("span");
        assert_eq!(doc.append_child(div, span), Ok(span));
        assert_eq!(doc.child_count(div), 1);
        assert_ends(&doc, div);

        let a = doc.create_element("a");
        doc.append_child(div, a).unwrap();
        assert_eq!(doc.child_count(div), 2);
        assert_eq!(doc.first_child(div), Some(span));
        assert_eq!(doc.last_child(div), Some(a));
        assert_eq!(doc.child_at(div, 1), Some(a));
        assert_eq!(doc.child_at(div, 2), None);
        assert_eq!(doc.parent_node(a), Some(div));
    }

    #[test]
    fn test_remove_child_rederives_both_ends() {
        let mut doc = Document::new(None, "root");
        let parent = doc.create_element("ul");
        let items: Vec<NodeId> = (0..3).map(|_| doc.create_element("li")).collect();
        for &item in &items {
            doc.append_child(parent, item).unwrap();
        }

        doc.remove_child(parent, items[0]).unwrap();
        assert_eq!(doc.first_child(parent), Some(items[1]));
        assert_ends(&doc, parent);

        doc.remove_child(parent, items[2]).unwrap();
        assert_eq!(doc.first_child(parent), Some(items[1]));
        assert_eq!(doc.last_child(parent), Some(items[1]));

        doc.remove_child(parent, items[1]).unwrap();
        assert_eq!(doc.first_child(parent), None);
        assert_eq!(doc.last_child(parent), None);
        assert_eq!(doc.parent_node(items[1]), None);
    }

    #[test]
    fn test_remove_child_not_found() {
        let mut doc = Document::new(None, "root");
        let parent = doc.create_element("div");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        doc.append_child(parent, a).unwrap();
        doc.append_child(parent, b).unwrap();

        let err = doc.remove_child(parent, c).unwrap_err();
        assert_eq!(err, DomError::NotFound { parent, child: c });
        assert!(err.to_string().contains("not a child of this node"));
        assert_eq!(children(&doc, parent), vec![a, b]);
        assert_eq!(doc.first_child(parent), Some(a));
        assert_eq!(doc.last_child(parent), Some(b));

        let nested = doc.create_element("i");
        doc.append_child(a, nested).unwrap();
        assert!(matches!(
            doc.remove_child(parent, nested),
            Err(DomError::NotFound { .. })
        ));
    }

    #[test]
    fn test_text_node_is_leaf() {
        let mut doc = Document::new(None, "root");
        let txt = doc.create_text_node("abc");
        let div = doc.create_element("div");

        assert_eq!(
            doc.append_child(txt, div),
            Err(DomError::LeafNode { op: "appended to" })
        );
        assert_eq!(
            doc.remove_child(txt, div),
            Err(DomError::LeafNode { op: "removed from" })
        );
        assert_eq!(doc.child_count(txt), 0);
        assert_eq!(
            doc.set_attribute(txt, "a", "1").unwrap_err(),
            DomError::NotAnElement(txt)
        );
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new(None, "root");
        let outer = doc.create_element("outer");
        let inner = doc.create_element("inner");
        doc.append_child(outer, inner).unwrap();

        assert_eq!(
            doc.append_child(outer, outer),
            Err(DomError::HierarchyRequest { child: outer })
        );
        assert_eq!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyRequest { child: outer })
        );
        assert_eq!(children(&doc, outer), vec![inner]);
    }

    #[test]
    fn test_append_moves_attached_node() {
        let mut doc = Document::new(None, "root");
        let first = doc.create_element("first");
        let second = doc.create_element("second");
        let item = doc.create_element("item");
        doc.append_child(first, item).unwrap();
        doc.append_child(second, item).unwrap();

        assert_eq!(doc.child_count(first), 0);
        assert_eq!(doc.first_child(first), None);
        assert_eq!(doc.parent_node(item), Some(second));
    }

    #[test]
    fn test_attributes_through_document() {
        let mut doc = Document::new(None, "root");
        let el = doc.create_element("div");
        doc.set_attribute(el, "a1", "123").unwrap();
        doc.set_attribute_ns(el, Some("urn:x"), "x:a2", "abc").unwrap();
        doc.set_attribute(el, "a1", "456").unwrap();

        let attrs = doc.attributes(el).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.item(0).map(Attr::value), Some("456"));
        assert_eq!(attrs.item(1).and_then(Attr::namespace_uri), Some("urn:x"));

        assert_eq!(doc.remove_attribute(el, "a1").map(|a| a.value().to_string()), Some("456".into()));
        assert_eq!(doc.remove_attribute(el, "a1"), None);
        assert_eq!(doc.get_attribute(el, "x:a2"), Some("abc"));
    }

    #[test]
    fn test_event_listeners_are_recorded() {
        let mut doc = Document::new(None, "root");
        let el = doc.create_element("button");
        let txt = doc.create_text_node("x");
        doc.add_event_listener(el, "click", false);
        doc.add_event_listener(txt, "click", true);

        let listeners = &doc.element(el).unwrap().listeners;
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].event_type, "click");
    }

    #[test]
    fn test_clone_node_deep_is_independent() {
        let mut doc = Document::new(None, "root");
        let row = doc.create_element("row");
        let cell = doc.create_element("cell");
        doc.append_child(row, cell).unwrap();
        doc.set_attribute(row, "r", "1").unwrap();
        doc.class_list_mut(row).unwrap().add(["odd"]);
        doc.style_mut(row).unwrap().set("color", "red");

        let copy = doc.clone_node(row, true).unwrap();
        doc.set_attribute(row, "r", "2").unwrap();
        doc.class_list_mut(row).unwrap().add(["even"]);
        let extra = doc.create_element("cell");
        doc.append_child(row, extra).unwrap();

        assert_eq!(doc.get_attribute(copy, "r"), Some("1"));
        assert_eq!(doc.class_list(copy).map(ClassList::value), Some("odd".into()));
        assert_eq!(doc.style(copy).and_then(|s| s.get("color")), Some("red"));
        assert_eq!(doc.child_count(copy), 1);
        let copied_cell = doc.first_child(copy).unwrap();
        assert_ne!(copied_cell, cell);
        assert_eq!(doc.node_name(copied_cell), Some("cell"));
        assert_eq!(doc.parent_node(copy), None);
    }

    #[test]
    fn test_clone_node_shallow_drops_collections() {
        let mut doc = Document::new(None, "root");
        let row = doc.create_element_ns(Some("urn:t"), "row");
        let cell = doc.create_element("cell");
        doc.append_child(row, cell).unwrap();
        doc.set_attribute(row, "r", "1").unwrap();
        doc.element_mut(row).unwrap().text_content = Some("abc".into());

        let copy = doc.clone_node(row, false).unwrap();
        assert_eq!(doc.node_name(copy), Some("row"));
        assert_eq!(doc.namespace_uri(copy), Some("urn:t"));
        assert_eq!(doc.text_content(copy), Some("abc"));
        assert!(doc.attributes(copy).is_some_and(NamedNodeMap::is_empty));
        assert_eq!(doc.child_count(copy), 0);
        assert_eq!(doc.first_child(copy), None);
    }

    #[test]
    fn test_clone_text_node() {
        let mut doc = Document::new(None, "root");
        let txt = doc.create_text_node("abc");
        let shallow = doc.clone_node(txt, false).unwrap();
        let deep = doc.clone_node(txt, true).unwrap();
        doc.text_mut(txt).unwrap().value = "123".into();

        assert_eq!(doc.node_value(txt), Some("123"));
        assert_eq!(doc.node_value(shallow), Some("abc"));
        assert_eq!(doc.node_value(deep), Some("abc"));
    }

    #[test]
    fn test_remove_children() {
        let mut doc = Document::new(None, "root");
        let root = doc.document_element();
        for name in ["a", "b", "c"] {
            let el = doc.create_element(name);
            doc.append_child(root, el).unwrap();
        }
        doc.remove_children(root).unwrap();
        assert_eq!(doc.child_count(root), 0);
        assert_eq!(doc.first_child(root), None);
        assert_eq!(doc.last_child(root), None);
    }

    /// A document with a populated root, plus ids that only `other` issued.
    fn two_documents() -> (Document, Document, Vec<NodeId>) {
        let mut doc = Document::new(None, "root");
        let root = doc.document_element();
        let item = doc.create_element("item");
        doc.append_child(root, item).unwrap();

        let mut other = Document::new(None, "other");
        let foreign = (0..4).map(|_| other.create_element("x")).collect();
        (doc, other, foreign)
    }

    #[test]
    fn test_in_range_id_from_another_document_is_foreign() {
        let mut a = Document::new(None, "a");
        let a1 = a.create_element("a1");
        a.append_child(a.document_element(), a1).unwrap();
        let mut b = Document::new(None, "b");
        let b1 = b.create_element("b1");

        assert!(!a.contains_node(b1));
        assert_eq!(a.get(b1).map(NodeData::node_name), None);
        assert_eq!(
            a.append_child(a.document_element(), b1),
            Err(DomError::ForeignNode(b1))
        );
        assert_eq!(a.to_string(), "<a><a1/></a>");
        assert_eq!(b.node_name(b1), Some("b1"));
    }

    #[test]
    fn test_foreign_ids_leave_tree_unchanged() {
        let (mut doc, _other, foreign) = two_documents();
        let root = doc.document_element();
        let before = doc.snapshot(root);
        let stranger = foreign[3];

        assert_eq!(doc.append_child(root, stranger), Err(DomError::ForeignNode(stranger)));
        assert_eq!(doc.append_child(stranger, root), Err(DomError::ForeignNode(stranger)));
        let item = doc.first_child(root).unwrap();
        assert_eq!(doc.remove_child(stranger, item), Err(DomError::ForeignNode(stranger)));
        assert_eq!(doc.clone_node(stranger, true), Err(DomError::ForeignNode(stranger)));
        assert_eq!(
            doc.set_attribute(stranger, "a", "1").unwrap_err(),
            DomError::ForeignNode(stranger)
        );
        assert_eq!(doc.remove_children(stranger), Err(DomError::ForeignNode(stranger)));
        assert_eq!(doc.drop_node(stranger), Err(DomError::ForeignNode(stranger)));

        assert_eq!(doc.snapshot(root), before);
        assert_eq!(children(&doc, root), vec![item]);
        assert_eq!(doc.parent_node(item), Some(root));
    }

    #[test]
    fn test_cloned_document_issues_its_own_ids() {
        let (doc, _other, _) = two_documents();
        let item = doc.first_child(doc.document_element()).unwrap();
        let copy = doc.clone();

        assert!(!copy.contains_node(item));
        let copied_item = copy.first_child(copy.document_element()).unwrap();
        assert_eq!(copy.node_name(copied_item), Some("item"));
        assert_eq!(copy.to_string(), doc.to_string());
    }

    #[test]
    fn test_drop_node_frees_subtree() {
        let mut doc = Document::new(None, "root");
        let root = doc.document_element();
        let list = doc.create_element("list");
        let entry = doc.create_element("entry");
        doc.append_child(list, entry).unwrap();
        doc.append_child(root, list).unwrap();

        doc.drop_node(list).unwrap();
        assert!(!doc.contains_node(list));
        assert!(!doc.contains_node(entry));
        assert_eq!(doc.child_count(root), 0);
        assert_eq!(doc.snapshot(list), None);
        assert_eq!(doc.append_child(root, entry), Err(DomError::ForeignNode(entry)));
        assert_eq!(doc.drop_node(list), Err(DomError::ForeignNode(list)));

        // Fresh nodes may reuse the freed slots; the old ids stay dead.
        let fresh: Vec<NodeId> = (0..2).map(|_| doc.create_element("fresh")).collect();
        assert!(fresh.iter().all(|&id| doc.contains_node(id)));
        assert!(!doc.contains_node(list));
        assert!(!doc.contains_node(entry));
    }

    #[test]
    fn test_drop_node_keeps_document_element() {
        let mut doc = Document::new(None, "root");
        let root = doc.document_element();
        assert_eq!(doc.drop_node(root), Err(DomError::DocumentElement(root)));

        let holder = doc.create_element("holder");
        doc.append_child(holder, root).unwrap();
        assert_eq!(doc.drop_node(holder), Err(DomError::DocumentElement(holder)));
        assert!(doc.contains_node(root));
        assert_eq!(doc.parent_node(root), Some(holder));
    }

    #[test]
    fn test_clone_node_deep_chain() {
        const DEPTH: usize = 100_000;
        let mut doc = Document::new(None, "root");
        // Build bottom-up so every append only walks the new parent.
        let mut top = doc.create_element("leaf");
        for _ in 1..DEPTH {
            let parent = doc.create_element("level");
            doc.append_child(parent, top).unwrap();
            top = parent;
        }

        let copy = doc.clone_node(top, true).unwrap();
        let mut depth = 1;
        let mut cursor = copy;
        while let Some(child) = doc.first_child(cursor) {
            assert_eq!(doc.child_count(cursor), 1);
            cursor = child;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(doc.node_name(cursor), Some("leaf"));
    }
}
