//! Entry listings across documents

use serde::Serialize;

use crate::fields::FieldMapping;

/// A listed field with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryListKey {
    pub field: String,
    pub label: String,
}

/// Fields to show in an entry list, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryListKeys {
    keys: Vec<EntryListKey>,
}

impl EntryListKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.keys.push(EntryListKey {
            field: field.into(),
            label: label.into(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryListKey> {
        self.keys.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.field.as_str())
    }

    pub fn label(&self, field: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|k| k.field == field)
            .map(|k| k.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for EntryListKeys {
    /// Keys labelled with their own field name.
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EntryListKeys::new(), |keys, field| keys.with(field, field))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryListEntry {
    pub identifier: String,
    pub fields: FieldMapping,
}

/// Identifier-keyed listing. Each identifier appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryList {
    keys: EntryListKeys,
    entries: Vec<EntryListEntry>,
}

impl EntryList {
    pub fn new(keys: EntryListKeys) -> Self {
        Self {
            keys,
            entries: Vec::new(),
        }
    }

    /// Add an entry restricted to the listed fields.
    ///
    /// Returns `false` and keeps the existing row if the identifier is
    /// already listed.
    pub fn add_entry(&mut self, identifier: impl Into<String>, data: &FieldMapping) -> bool {
        let identifier = identifier.into();
        if self.get(&identifier).is_some() {
            return false;
        }
        let fields = data.restricted_to(self.keys.fields());
        self.entries.push(EntryListEntry { identifier, fields });
        true
    }

    pub fn keys(&self) -> &EntryListKeys {
        &self.keys
    }

    pub fn entries(&self) -> &[EntryListEntry] {
        &self.entries
    }

    pub fn get(&self, identifier: &str) -> Option<&EntryListEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
