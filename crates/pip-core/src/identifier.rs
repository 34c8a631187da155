//! Locating entries by identifier

use pip_xml::{Element, XmlDocument};

use crate::serializer::{DELETE, IMPORT};

/// Position of an entry: index of its container among the root's children
/// and index of the entry among the container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLocation {
    pub container: usize,
    pub child: usize,
}

/// Resolves entry identifiers from an identifier attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierResolver {
    tag_name: String,
    attribute: String,
}

impl IdentifierResolver {
    pub fn new(tag_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attribute: attribute.into(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Identifier of an entry element; empty if the attribute is missing.
    pub fn identifier_of(&self, element: &Element) -> String {
        element.attribute(&self.attribute).unwrap_or_default().to_string()
    }

    pub fn is_entry(&self, element: &Element) -> bool {
        element.local_name() == self.tag_name
    }

    fn matches(&self, element: &Element, identifier: &str) -> bool {
        self.is_entry(element) && element.attribute(&self.attribute) == Some(identifier)
    }

    /// Entries in all `<import>` containers, in document order.
    pub fn import_entries<'a>(&self, document: &'a XmlDocument) -> Vec<&'a Element> {
        document.select(&format!("/*/{IMPORT}/{}", self.tag_name))
    }

    /// Deletion markers in all `<delete>` containers, in document order.
    pub fn delete_entries<'a>(&self, document: &'a XmlDocument) -> Vec<&'a Element> {
        document.select(&format!("/*/{DELETE}/{}", self.tag_name))
    }

    /// The first imported entry with the identifier.
    pub fn find_by_identifier<'a>(
        &self,
        document: &'a XmlDocument,
        identifier: &str,
    ) -> Option<&'a Element> {
        self.import_entries(document)
            .into_iter()
            .find(|e| self.matches(e, identifier))
    }

    pub fn locate(&self, document: &XmlDocument, identifier: &str) -> Option<EntryLocation> {
        self.locate_in(document.root(), IMPORT, identifier)
    }

    /// Locate a deletion marker.
    pub fn locate_marker(&self, document: &XmlDocument, identifier: &str) -> Option<EntryLocation> {
        self.locate_in(document.root(), DELETE, identifier)
    }

    fn locate_in(&self, root: &Element, container: &str, identifier: &str) -> Option<EntryLocation> {
        root.children().iter().enumerate().find_map(|(index, node)| {
            let element = node.as_element().filter(|e| e.local_name() == container)?;
            let child = element
                .children()
                .iter()
                .position(|n| n.as_element().is_some_and(|e| self.matches(e, identifier)))?;
            Some(EntryLocation {
                container: index,
                child,
            })
        })
    }

    pub fn element_at<'a>(&self, document: &'a XmlDocument, location: EntryLocation) -> Option<&'a Element> {
        document
            .root()
            .children()
            .get(location.container)?
            .as_element()?
            .children()
            .get(location.child)?
            .as_element()
    }

    pub fn element_at_mut<'a>(
        &self,
        document: &'a mut XmlDocument,
        location: EntryLocation,
    ) -> Option<&'a mut Element> {
        document
            .root_mut()
            .children_mut()
            .get_mut(location.container)?
            .as_element_mut()?
            .children_mut()
            .get_mut(location.child)?
            .as_element_mut()
    }

    /// Remove the element at `location` and return it.
    pub fn remove_at(&self, document: &mut XmlDocument, location: EntryLocation) -> Option<Element> {
        let container = document
            .root_mut()
            .children_mut()
            .get_mut(location.container)?
            .as_element_mut()?;
        if location.child >= container.children().len() {
            return None;
        }
        match container.children_mut().remove(location.child) {
            pip_xml::Node::Element(element) => Some(element),
            _ => None,
        }
    }
}
