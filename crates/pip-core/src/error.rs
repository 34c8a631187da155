//! Error types for pip-core

use pip_meta::ValidationErrors;

/// Result type for pip-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pip-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No managed document contains the identifier
    #[error("Unknown entry with identifier '{identifier}'")]
    UnknownIdentifier { identifier: String },

    /// An edit matched no entry in any managed document
    #[error("No entry found to edit for identifier '{identifier}'")]
    NoEntryEdited { identifier: String },

    /// A required field is missing from the field mapping
    #[error("Missing value for required field '{field}'")]
    MissingField { field: String },

    /// A project file is well-formed XML but not an entry document
    #[error("Invalid project document {path}: {message}")]
    InvalidDocument { path: String, message: String },

    /// A multi-document reconciler was created without documents
    #[error("At least one project XML document is required")]
    NoDocuments,

    /// Table names are built from config and must be plain identifiers
    #[error("Invalid table name: {name}")]
    InvalidTableName { name: String },

    /// Submitted field values were rejected
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    // Transparent wrappers for underlying crate errors
    /// Database statement failure
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// XML error from pip-xml
    #[error(transparent)]
    Xml(#[from] pip_xml::Error),

    /// Metadata error from pip-meta
    #[error(transparent)]
    Meta(#[from] pip_meta::Error),

    /// Filesystem error from pip-fs
    #[error(transparent)]
    Fs(#[from] pip_fs::Error),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
