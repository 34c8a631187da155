//! Entry kinds: what an entry element looks like and how it maps to fields
//!
//! A kind declares a binding table instead of reading XML itself; the
//! reconciler evaluates the table to build elements and extract data.

use std::cmp::Ordering;

use pip_xml::{Element, XmlDocument};

use crate::entry_list::EntryListKeys;
use crate::fields::FieldMapping;
use crate::identifier::IdentifierResolver;
use crate::serializer::{self, DocumentSorter};

/// Where a field value lives inside an entry element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// An attribute of the entry element
    Attribute(&'static str),
    /// The character data of the entry element
    Text,
}

/// Maps one form field onto the entry element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: &'static str,
    pub target: FieldTarget,
    pub required: bool,
}

impl FieldBinding {
    pub const fn required(field: &'static str, target: FieldTarget) -> Self {
        Self {
            field,
            target,
            required: true,
        }
    }

    pub const fn optional(field: &'static str, target: FieldTarget) -> Self {
        Self {
            field,
            target,
            required: false,
        }
    }
}

/// A kind of entry managed in project XML documents.
pub trait EntryKind {
    /// Local name of the entry element, e.g. `pip`.
    fn tag_name(&self) -> &str;

    /// Attribute carrying the entry identifier.
    fn identifier_attribute(&self) -> &str {
        "name"
    }

    fn bindings(&self) -> &[FieldBinding];

    /// Add fields that are not stored in the element but derived from
    /// context.
    fn derived_fields(&self, _element: &Element, _data: &mut FieldMapping) {}

    /// Order of entries inside a container.
    fn compare(&self, a: &Element, b: &Element) -> Ordering {
        let attribute = self.identifier_attribute();
        a.attribute(attribute)
            .unwrap_or_default()
            .cmp(b.attribute(attribute).unwrap_or_default())
    }

    /// File name a package ships entries of this kind in.
    fn default_filename(&self) -> &str;

    /// Name of the XSD the document root points to.
    fn schema_name(&self) -> &str;

    /// Fields shown in the entry list together with their labels.
    fn entry_list_keys(&self) -> EntryListKeys;

    fn resolver(&self) -> IdentifierResolver {
        IdentifierResolver::new(self.tag_name(), self.identifier_attribute())
    }

    /// Place a new entry in the document. Entries go to the end of the
    /// first `<import>` container, which is created if missing.
    fn insert_element(&self, root: &mut Element, element: Element) {
        let index = serializer::ensure_container(root, serializer::IMPORT);
        if let Some(import) = root.children_mut()[index].as_element_mut() {
            import.append_child(element);
        }
    }

    /// Normalize a document before it is written.
    fn sort_document(&self, document: &mut XmlDocument) {
        DocumentSorter::new(self).sort(document);
    }

    /// A document without any entries.
    fn empty_document(&self) -> XmlDocument {
        let location = format!(
            "{SCHEMA_NAMESPACE} {SCHEMA_NAMESPACE}/XSD/2019/{}.xsd",
            self.schema_name()
        );
        XmlDocument::new(
            Element::new("data")
                .with_attribute("xmlns", SCHEMA_NAMESPACE)
                .with_attribute("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
                .with_attribute("xsi:schemaLocation", location)
                .with_child(Element::new(serializer::IMPORT)),
        )
    }
}

pub const SCHEMA_NAMESPACE: &str = "http://www.woltlab.com";

/// Build an entry element from submitted fields.
///
/// Returns the name of the first required field without a value.
pub(crate) fn build_element<K: EntryKind + ?Sized>(
    kind: &K,
    fields: &FieldMapping,
) -> Result<Element, String> {
    let mut element = Element::new(kind.tag_name());
    for binding in kind.bindings() {
        let value = fields.get(binding.field).unwrap_or_default();
        if value.is_empty() {
            if binding.required {
                return Err(binding.field.to_string());
            }
            continue;
        }
        match binding.target {
            FieldTarget::Attribute(name) => element.set_attribute(name, value),
            FieldTarget::Text => element.set_text(value),
        }
    }
    Ok(element)
}

/// Read the bound fields of an entry element.
pub(crate) fn read_element<K: EntryKind + ?Sized>(kind: &K, element: &Element) -> FieldMapping {
    let mut data = FieldMapping::new();
    for binding in kind.bindings() {
        match binding.target {
            FieldTarget::Attribute(name) => {
                if let Some(value) = element.attribute(name) {
                    data.insert(binding.field, value);
                }
            }
            FieldTarget::Text => data.insert(binding.field, element.text_content()),
        }
    }
    kind.derived_fields(element, &mut data);
    data
}
