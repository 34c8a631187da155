//! The `pip` entry kind: registrations of package installation plugins

use pip_meta::PackageConfig;
use pip_meta::config::DEFAULT_FILENAME;
use pip_xml::Element;

use crate::entry_list::EntryListKeys;
use crate::fields::FieldMapping;
use crate::kind::{EntryKind, FieldBinding, FieldTarget};

pub const TAG_NAME: &str = "pip";
pub const PLUGIN_NAME: &str = "pluginName";
pub const CLASS_NAME: &str = "className";
pub const PRIORITY: &str = "priority";

/// Prefix of the language items used for labels and validation messages.
pub const PHRASE_PREFIX: &str = "wcf.acp.pip.pip";

const BINDINGS: &[FieldBinding] = &[
    FieldBinding::required(PLUGIN_NAME, FieldTarget::Attribute("name")),
    FieldBinding::required(CLASS_NAME, FieldTarget::Text),
];

/// `<pip name="pluginName">className</pip>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipEntryKind {
    priority: i64,
}

impl PipEntryKind {
    pub fn new(package: &PackageConfig) -> Self {
        Self {
            priority: priority_for(package),
        }
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Plugins of the core package run first.
pub fn priority_for(package: &PackageConfig) -> i64 {
    if package.is_core() { 1 } else { 0 }
}

impl EntryKind for PipEntryKind {
    fn tag_name(&self) -> &str {
        TAG_NAME
    }

    fn bindings(&self) -> &[FieldBinding] {
        BINDINGS
    }

    fn derived_fields(&self, _element: &Element, data: &mut FieldMapping) {
        data.insert(PRIORITY, self.priority.to_string());
    }

    fn default_filename(&self) -> &str {
        DEFAULT_FILENAME
    }

    fn schema_name(&self) -> &str {
        "packageInstallationPlugin"
    }

    fn entry_list_keys(&self) -> EntryListKeys {
        EntryListKeys::new()
            .with(PLUGIN_NAME, format!("{PHRASE_PREFIX}.{PLUGIN_NAME}"))
            .with(CLASS_NAME, format!("{PHRASE_PREFIX}.{CLASS_NAME}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{build_element, read_element};
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_pip_element() {
        let fields = FieldMapping::new()
            .with(PLUGIN_NAME, "foo")
            .with(CLASS_NAME, "vendor\\FooPackageInstallationPlugin");
        let element = build_element(&PipEntryKind::default(), &fields).unwrap();

        assert_eq!(
            element,
            Element::new("pip")
                .with_attribute("name", "foo")
                .with_text("vendor\\FooPackageInstallationPlugin")
        );
    }

    #[test]
    fn missing_class_name_is_reported() {
        let fields = FieldMapping::new().with(PLUGIN_NAME, "foo");
        assert_eq!(
            build_element(&PipEntryKind::default(), &fields),
            Err(CLASS_NAME.to_string())
        );
    }

    #[test]
    fn core_package_entries_get_priority_one() {
        let kind = PipEntryKind::new(&PackageConfig::new(1, "com.woltlab.wcf"));
        let element = Element::new("pip").with_attribute("name", "foo").with_text("Foo");

        let data = read_element(&kind, &element);

        assert_eq!(
            data.iter().collect::<Vec<_>>(),
            vec![(PLUGIN_NAME, "foo"), (CLASS_NAME, "Foo"), (PRIORITY, "1")]
        );
    }

    #[test]
    fn empty_document_has_import_container() {
        let document = PipEntryKind::default().empty_document();
        assert_eq!(document.root().local_name(), "data");
        assert!(document.root().first_child_named("import").is_some());
        assert!(
            document
                .root()
                .attribute("xsi:schemaLocation")
                .unwrap()
                .ends_with("/XSD/2019/packageInstallationPlugin.xsd")
        );
    }
}
