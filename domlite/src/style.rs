//! Inline style declarations.

use compact_str::CompactString;
use indexmap::IndexMap;

/// Inline style of an element: property name to value, in insertion order.
///
/// Property names are taken verbatim, so `zIndex` and `z-index` are distinct
/// keys. Priorities are accepted and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: IndexMap<CompactString, String>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set `name`, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.properties.insert(CompactString::from(name), value.into());
    }

    /// Remove `name`, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.shift_remove(name)
    }

    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<String>, _priority: Option<&str>) {
        self.set(name, value);
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.remove(name)
    }

    /// Always empty: priorities are not stored.
    pub fn get_property_priority(&self, _name: &str) -> &str {
        ""
    }

    /// Value of the property at `index` in insertion order.
    pub fn item(&self, index: usize) -> Option<&str> {
        self.properties.get_index(index).map(|(_, v)| v.as_str())
    }

    /// Name of the property at `index` in insertion order.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.properties.get_index(index).map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
