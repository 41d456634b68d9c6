//! Attributes and the ordered attribute collection of an element.

use facet::Facet;
use indexmap::IndexMap;

use crate::namespace::{split_qualified_name, well_known_namespace};

/// Value stored in an attribute created without one.
pub const UNSET_VALUE: &str = "null";

/// A single attribute.
///
/// The qualified name is fixed at construction. If it carries a prefix,
/// `prefix` and `local_name` are split out, and the reserved `xml` / `xmlns`
/// prefixes always map to their fixed namespaces regardless of what the
/// caller passed in.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Attr {
    name: String,
    value: String,
    namespace_uri: Option<String>,
    local_name: Option<String>,
    prefix: Option<String>,
}

impl Attr {
    /// Create an attribute with no namespace.
    pub fn new(qualified_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new_ns(None::<String>, qualified_name, value)
    }

    /// Create an attribute in `namespace_uri`.
    pub fn new_ns(
        namespace_uri: Option<impl Into<String>>,
        qualified_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = qualified_name.into();
        let mut namespace_uri = namespace_uri.map(Into::into);
        let (prefix, local_name) = match split_qualified_name(&name) {
            Some((prefix, local)) => {
                if let Some(ns) = well_known_namespace(prefix) {
                    namespace_uri = Some(ns.to_string());
                }
                (Some(prefix.to_string()), Some(local.to_string()))
            }
            None => (None, None),
        };

        Self {
            name,
            value: value.into(),
            namespace_uri,
            local_name,
            prefix,
        }
    }

    /// Create an attribute whose value has not been set yet.
    pub fn unset(namespace_uri: Option<impl Into<String>>, qualified_name: impl Into<String>) -> Self {
        Self::new_ns(namespace_uri, qualified_name, UNSET_VALUE)
    }

    /// The qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Part of the name after the first colon, for prefixed names.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    /// Part of the name before the first colon, for prefixed names.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// Ordered attribute collection, unique by qualified name.
///
/// Setting an existing name replaces the entry in place; setting a new name
/// appends it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedNodeMap {
    entries: IndexMap<String, Attr>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute at `index` in insertion order.
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.entries.get_index(index).map(|(_, attr)| attr)
    }

    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.entries.get(name)
    }

    /// Looks up by `local_name` against the qualified name; `namespace_uri`
    /// plays no part in the match.
    pub fn get_named_item_ns(&self, _namespace_uri: Option<&str>, local_name: &str) -> Option<&Attr> {
        self.get_named_item(local_name)
    }

    /// Insert `attr`, replacing any entry with the same name in place.
    pub fn set_named_item(&mut self, attr: Attr) -> &Attr {
        let (index, _) = self.entries.insert_full(attr.name.clone(), attr);
        &self.entries[index]
    }

    /// Same as [`set_named_item`](Self::set_named_item); namespaces are not
    /// used to key the collection.
    pub fn set_named_item_ns(&mut self, attr: Attr) -> &Attr {
        self.set_named_item(attr)
    }

    pub fn remove_named_item(&mut self, name: &str) -> Option<Attr> {
        self.entries.shift_remove(name)
    }

    pub fn remove_named_item_ns(&mut self, _namespace_uri: Option<&str>, local_name: &str) -> Option<Attr> {
        self.remove_named_item(local_name)
    }

    /// Shorthand for the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_named_item(name).map(Attr::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.entries.values()
    }
}

impl FromIterator<Attr> for NamedNodeMap {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        let mut map = Self::new();
        for attr in iter {
            map.set_named_item(attr);
        }
        map
    }
}

impl<'a> IntoIterator for &'a NamedNodeMap {
    type Item = &'a Attr;
    type IntoIter = indexmap::map::Values<'a, String, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
