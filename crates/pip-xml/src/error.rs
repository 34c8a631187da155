//! Error types for pip-xml

use std::path::PathBuf;

/// Result type for pip-xml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pip-xml operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed XML at byte {position}: {message}")]
    ParseError { position: u64, message: String },

    #[error("Failed to load XML document {path}: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Fs(#[from] pip_fs::Error),
}

impl Error {
    pub fn parse(position: u64, message: impl Into<String>) -> Self {
        Self::ParseError {
            position,
            message: message.into(),
        }
    }

    /// Attach the file a parse error came from.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::ParseError { .. } => Self::InvalidFile {
                path: path.into(),
                source: Box::new(self),
            },
            other => other,
        }
    }

    /// Whether this error reports malformed XML (directly or for a file).
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::InvalidFile { .. })
    }
}
