//! Well-known namespaces, qualified names, and document content types.

use facet::Facet;

/// Namespace bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace bound to the `xmlns` prefix.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Returns the fixed namespace for the reserved `xml` and `xmlns` prefixes.
pub fn well_known_namespace(prefix: &str) -> Option<&'static str> {
    match prefix {
        "xml" => Some(XML_NAMESPACE),
        "xmlns" => Some(XMLNS_NAMESPACE),
        _ => None,
    }
}

/// Splits `prefix:local` at the first colon.
///
/// Returns `None` for unprefixed names.
pub fn split_qualified_name(qualified_name: &str) -> Option<(&str, &str)> {
    qualified_name.split_once(':')
}

/// MIME type tag carried by a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Facet)]
#[repr(u8)]
pub enum ContentType {
    /// `text/html`
    Html,
    /// `text/xml`
    #[default]
    Xml,
}

impl ContentType {
    /// Returns the MIME string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Xml => "text/xml",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
