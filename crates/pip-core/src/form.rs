//! Validation of submitted `pip` fields
//!
//! Runs before a mutation so rejected submissions never reach documents or
//! the database.

use std::collections::HashSet;

use pip_meta::validation::{validate_class_name, validate_plugin_name};
use pip_meta::{FieldError, PluginRegistry, ValidationErrors};

use crate::fields::FieldMapping;
use crate::pip::{CLASS_NAME, PHRASE_PREFIX, PLUGIN_NAME};

/// Validator for the `pip` add and edit forms.
#[derive(Debug, Clone)]
pub struct PipFormValidator<'r> {
    registry: &'r PluginRegistry,
    registered_names: HashSet<String>,
    edited_identifier: Option<String>,
}

impl<'r> PipFormValidator<'r> {
    /// `registered_names` are the plugin names already taken.
    pub fn new(registry: &'r PluginRegistry, registered_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            registry,
            registered_names: registered_names.into_iter().collect(),
            edited_identifier: None,
        }
    }

    /// Exempt the entry being edited from the uniqueness check.
    pub fn editing(mut self, identifier: impl Into<String>) -> Self {
        self.edited_identifier = Some(identifier.into());
        self
    }

    pub fn validate(&self, fields: &FieldMapping) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let plugin_name = fields.get(PLUGIN_NAME).unwrap_or_default();
        let is_registered = |name: &str| {
            self.edited_identifier.as_deref() != Some(name) && self.registered_names.contains(name)
        };
        for kind in validate_plugin_name(plugin_name, is_registered) {
            errors.push(FieldError::new(PHRASE_PREFIX, PLUGIN_NAME, kind));
        }

        let class_name = fields.get(CLASS_NAME).unwrap_or_default();
        for kind in validate_class_name(class_name, self.registry) {
            errors.push(FieldError::new(PHRASE_PREFIX, CLASS_NAME, kind));
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pip_meta::ValidationErrorKind;
    use rstest::rstest;

    const OPTION_PLUGIN: &str = "wcf\\system\\package\\plugin\\OptionPackageInstallationPlugin";

    fn fields(name: &str, class_name: &str) -> FieldMapping {
        FieldMapping::new()
            .with(PLUGIN_NAME, name)
            .with(CLASS_NAME, class_name)
    }

    #[test]
    fn accepts_valid_submission() {
        let registry = PluginRegistry::with_builtins();
        let validator = PipFormValidator::new(&registry, ["acpMenu".to_string()]);
        assert!(validator.validate(&fields("fooBar", OPTION_PLUGIN)).is_ok());
    }

    #[rstest]
    #[case("Foo1", ValidationErrorKind::Format)]
    #[case("acpMenu", ValidationErrorKind::NotUnique)]
    #[case("", ValidationErrorKind::Required)]
    fn rejects_plugin_name(#[case] name: &str, #[case] expected: ValidationErrorKind) {
        let registry = PluginRegistry::with_builtins();
        let validator = PipFormValidator::new(&registry, ["acpMenu".to_string()]);

        let errors = validator.validate(&fields(name, OPTION_PLUGIN)).unwrap_err();

        assert!(errors.has(PLUGIN_NAME, expected));
        assert_eq!(errors.for_field(CLASS_NAME).count(), 0);
    }

    #[test]
    fn edited_identifier_is_exempt_from_uniqueness() {
        let registry = PluginRegistry::with_builtins();
        let validator = PipFormValidator::new(&registry, ["acpMenu".to_string()]).editing("acpMenu");
        assert!(validator.validate(&fields("acpMenu", OPTION_PLUGIN)).is_ok());
    }

    #[test]
    fn rejects_unknown_class_with_message_key() {
        let registry = PluginRegistry::with_builtins();
        let validator = PipFormValidator::new(&registry, Vec::new());

        let errors = validator
            .validate(&fields("fooBar", "\\vendor\\Missing"))
            .unwrap_err();

        let messages: Vec<_> = errors.for_field(CLASS_NAME).map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "wcf.acp.pip.pip.className.error.leadingBackslash",
                "wcf.acp.pip.pip.className.error.nonExistent"
            ]
        );
    }
}
