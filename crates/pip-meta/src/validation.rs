//! Field validators for plugin registrations
//!
//! Validators only report problems; they never touch documents or rows.
//! Errors are collected per field so a form can show all of them at once.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::registry::{Capability, PluginRegistry};

static PLUGIN_NAME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][A-Za-z]+$").expect("plugin name pattern is valid")
});

/// What is wrong with a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    Format,
    NotUnique,
    LeadingBackslash,
    NonExistent,
    Interface,
    NotInstantiable,
}

impl ValidationErrorKind {
    /// Suffix of the language item describing the error.
    pub fn message_suffix(&self) -> &'static str {
        match self {
            Self::Required => "empty",
            Self::Format => "format",
            Self::NotUnique => "notUnique",
            Self::LeadingBackslash => "leadingBackslash",
            Self::NonExistent => "nonExistent",
            Self::Interface => "interface",
            Self::NotInstantiable => "isInstantiable",
        }
    }
}

/// A validation error for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: ValidationErrorKind,
    /// Language item key, e.g. `wcf.acp.pip.pip.pluginName.error.format`
    pub message: String,
}

impl FieldError {
    pub fn new(prefix: &str, field: &str, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: format!("{prefix}.{field}.error.{}", kind.message_suffix()),
        }
    }
}

/// All validation errors of one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Errors reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has(&self, field: &str, kind: ValidationErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }

    /// `Ok(())` when nothing was reported.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} ({})", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Validate a plugin name.
///
/// `is_registered` tells whether a name is already taken; the caller
/// excludes the entry being edited.
pub fn validate_plugin_name(
    value: &str,
    is_registered: impl Fn(&str) -> bool,
) -> Vec<ValidationErrorKind> {
    if value.is_empty() {
        return vec![ValidationErrorKind::Required];
    }

    let mut errors = Vec::new();
    if !PLUGIN_NAME_FORMAT.is_match(value) {
        errors.push(ValidationErrorKind::Format);
    }
    if is_registered(value) {
        errors.push(ValidationErrorKind::NotUnique);
    }
    errors
}

/// Validate a plugin class name against the registry.
///
/// Capability and instantiability are only checked for known classes.
pub fn validate_class_name(value: &str, registry: &PluginRegistry) -> Vec<ValidationErrorKind> {
    if value.is_empty() {
        return vec![ValidationErrorKind::Required];
    }

    let mut errors = Vec::new();
    if value.starts_with('\\') {
        errors.push(ValidationErrorKind::LeadingBackslash);
    }

    match registry.get(value) {
        None => errors.push(ValidationErrorKind::NonExistent),
        Some(implementation) => {
            if !implementation.has_capability(Capability::PackageInstallationPlugin) {
                errors.push(ValidationErrorKind::Interface);
            }
            if !implementation.is_instantiable() {
                errors.push(ValidationErrorKind::NotInstantiable);
            }
        }
    }
    errors
}
