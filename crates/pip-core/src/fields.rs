//! Ordered field mappings handed over by the form boundary

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from field identifier to value.
///
/// Insertion order is kept so listings and JSON output follow the order in
/// which fields were declared. Setting an existing field replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder variant of [`FieldMapping::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(f, _)| f == field)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fields present in both `self` and `keys`, in the order of `keys`.
    pub fn restricted_to<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> FieldMapping {
        keys.into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Copy every field of `other` into `self`, overriding existing values.
    pub fn merge(&mut self, other: &FieldMapping) {
        for (field, value) in other.iter() {
            self.insert(field, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = FieldMapping::new();
        for (field, value) in iter {
            mapping.insert(field, value);
        }
        mapping
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_replaces_in_place() {
        let mut fields = FieldMapping::new()
            .with("pluginName", "foo")
            .with("className", "Vendor\\Foo");
        fields.insert("pluginName", "bar");

        assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["pluginName", "className"]);
        assert_eq!(fields.get("pluginName"), Some("bar"));
    }

    #[test]
    fn restricted_to_follows_key_order_and_skips_missing() {
        let fields = FieldMapping::new()
            .with("className", "Vendor\\Foo")
            .with("priority", "0")
            .with("pluginName", "foo");

        let restricted = fields.restricted_to(["pluginName", "missing", "className"]);

        assert_eq!(
            restricted.iter().collect::<Vec<_>>(),
            vec![("pluginName", "foo"), ("className", "Vendor\\Foo")]
        );
    }

    #[test]
    fn merge_overrides() {
        let mut base = FieldMapping::new().with("a", "1").with("b", "2");
        base.merge(&FieldMapping::new().with("b", "3").with("c", "4"));
        assert_eq!(
            base.iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "3"), ("c", "4")]
        );
    }

    #[test]
    fn serializes_as_ordered_map() {
        let fields = FieldMapping::new().with("z", "1").with("a", "2");
        assert_eq!(serde_json::to_string(&fields).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
