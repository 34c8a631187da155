//! XML document type

use crate::error::Result;
use crate::node::{Element, Node};
use crate::{parser, query, writer};

/// The `<?xml …?>` declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// An owned, always well-formed XML document.
///
/// A document can only be obtained by parsing well-formed text or by
/// building a tree through [`Element`], so rendering it always yields
/// well-formed text. Parsing that text gives back an equal document as long
/// as no text node is whitespace-only and text mixed with child elements
/// carries no surrounding whitespace; the text of character-data-only
/// elements is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    declaration: Option<Declaration>,
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl XmlDocument {
    /// Create a document around a root element with the default declaration.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: Some(Declaration::default()),
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        declaration: Option<Declaration>,
        prolog: Vec<Node>,
        root: Element,
        epilog: Vec<Node>,
    ) -> Self {
        Self {
            declaration,
            prolog,
            root,
            epilog,
        }
    }

    /// Parse XML text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for malformed input: mismatched or unclosed tags,
    /// invalid attributes, text outside the root element, or a document with
    /// zero or several root elements.
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse(source)
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Comments before the root element.
    pub fn prolog(&self) -> &[Node] {
        &self.prolog
    }

    /// Comments after the root element.
    pub fn epilog(&self) -> &[Node] {
        &self.epilog
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Select elements by an XPath-style path.
    ///
    /// Absolute paths (`/data/import/pip`) start at the root element,
    /// relative paths (`import/pip`) at the root's children. `*` matches any
    /// element. Names are compared without namespace prefixes.
    ///
    /// ```
    /// use pip_xml::XmlDocument;
    ///
    /// let doc = XmlDocument::parse(
    ///     r#"<data><import><pip name="a">A</pip></import></data>"#,
    /// ).unwrap();
    /// assert_eq!(doc.select("/data/import/pip").len(), 1);
    /// assert_eq!(doc.select("/*/delete/pip").len(), 0);
    /// ```
    pub fn select(&self, path: &str) -> Vec<&Element> {
        query::select_from_document(self, path)
    }

    /// First element matching [`XmlDocument::select`].
    pub fn select_first(&self, path: &str) -> Option<&Element> {
        self.select(path).into_iter().next()
    }

    /// Render to canonical text.
    pub fn render(&self) -> String {
        writer::render(self)
    }

    /// Structural equality: same tree and comments, declaration ignored.
    pub fn structurally_eq(&self, other: &XmlDocument) -> bool {
        self.root == other.root && self.prolog == other.prolog && self.epilog == other.epilog
    }
}
