//! Canonical ordering of entry documents
//!
//! `<import>` always precedes `<delete>`, and entries inside each container
//! are stably sorted. Comments and other non-element nodes inside a
//! container are kept, ahead of the sorted entries.

use std::cmp::Ordering;

use pip_xml::{Element, Node, XmlDocument};

use crate::kind::EntryKind;

pub const IMPORT: &str = "import";
pub const DELETE: &str = "delete";

/// Sorts documents holding entries of one kind.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSorter<'k, K: EntryKind + ?Sized> {
    kind: &'k K,
}

impl<'k, K: EntryKind + ?Sized> DocumentSorter<'k, K> {
    pub fn new(kind: &'k K) -> Self {
        Self { kind }
    }

    /// Put the document in canonical order. Sorting twice changes nothing.
    pub fn sort(&self, document: &mut XmlDocument) {
        sort_import_delete(document.root_mut());
        sort_containers(document.root_mut(), |a, b| self.kind.compare(a, b));
    }
}

/// Move the first `<import>` container in front of the first `<delete>`
/// container if it comes after it.
pub fn sort_import_delete(root: &mut Element) {
    let (Some(import), Some(delete)) = (
        root.child_index_named(IMPORT),
        root.child_index_named(DELETE),
    ) else {
        return;
    };
    if delete < import {
        let children = root.children_mut();
        let node = children.remove(import);
        children.insert(delete, node);
    }
}

/// Stably sort the element children of `container`.
pub fn sort_child_nodes(container: &mut Element, mut compare: impl FnMut(&Element, &Element) -> Ordering) {
    let children = std::mem::take(container.children_mut());
    let (mut elements, others): (Vec<Node>, Vec<Node>) =
        children.into_iter().partition(Node::is_element);
    elements.sort_by(|a, b| match (a.as_element(), b.as_element()) {
        (Some(a), Some(b)) => compare(a, b),
        _ => Ordering::Equal,
    });
    container.children_mut().extend(others.into_iter().chain(elements));
}

/// Sort every `<import>` and `<delete>` container of the root.
pub fn sort_containers(root: &mut Element, mut compare: impl FnMut(&Element, &Element) -> Ordering) {
    for node in root.children_mut() {
        if let Some(container) = node.as_element_mut()
            && matches!(container.local_name(), IMPORT | DELETE)
        {
            sort_child_nodes(container, &mut compare);
        }
    }
}

/// Index of the first container with the given name, creating it if
/// missing. A new `<import>` goes before an existing `<delete>`; anything
/// else is appended.
pub fn ensure_container(root: &mut Element, name: &str) -> usize {
    if let Some(index) = root.child_index_named(name) {
        return index;
    }
    let index = match (name, root.child_index_named(DELETE)) {
        (IMPORT, Some(delete)) => delete,
        _ => root.children().len(),
    };
    root.children_mut().insert(index, Element::new(name).into());
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pip::PipEntryKind;
    use pretty_assertions::assert_eq;

    fn by_name(a: &Element, b: &Element) -> Ordering {
        a.attribute("name").cmp(&b.attribute("name"))
    }

    #[test]
    fn import_moves_before_delete() {
        let mut root = Element::new("data")
            .with_child(Element::new("delete"))
            .with_child(Element::new("import"));
        sort_import_delete(&mut root);
        let names: Vec<_> = root.child_elements().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["import", "delete"]);
    }

    #[test]
    fn sort_is_stable_and_keeps_comments_first() {
        let mut container = Element::new("import")
            .with_child(Element::new("pip").with_attribute("name", "b").with_text("1"))
            .with_child(Node::Comment("note".to_string()))
            .with_child(Element::new("pip").with_attribute("name", "a"))
            .with_child(Element::new("pip").with_attribute("name", "b").with_text("2"));

        sort_child_nodes(&mut container, by_name);

        let rendered: Vec<String> = container
            .children()
            .iter()
            .map(|n| match n {
                Node::Element(e) => format!("{}{}", e.attribute("name").unwrap(), e.text_content()),
                Node::Comment(c) => c.clone(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(rendered, vec!["note", "a", "b1", "b2"]);
    }

    #[test]
    fn ensure_container_places_import_before_delete() {
        let mut root = Element::new("data").with_child(Element::new("delete"));
        assert_eq!(ensure_container(&mut root, IMPORT), 0);
        assert_eq!(ensure_container(&mut root, IMPORT), 0);
        assert_eq!(ensure_container(&mut root, DELETE), 1);
    }

    #[test]
    fn sorts_unsorted_fixture() {
        let mut document = XmlDocument::parse(include_str!(
            "../../../test-fixtures/xml/unsorted.xml"
        ))
        .unwrap();
        DocumentSorter::new(&PipEntryKind::default()).sort(&mut document);

        let import: Vec<_> = document
            .select("/*/import/pip")
            .into_iter()
            .filter_map(|e| e.attribute("name"))
            .collect();
        let delete: Vec<_> = document
            .select("/*/delete/pip")
            .into_iter()
            .filter_map(|e| e.attribute("name"))
            .collect();
        assert_eq!(import, vec!["alpha", "mu", "zeta"]);
        assert_eq!(delete, vec!["beta", "zeta"]);
        assert!(
            document.root().child_index_named("import").unwrap()
                < document.root().child_index_named("delete").unwrap()
        );
    }
}
