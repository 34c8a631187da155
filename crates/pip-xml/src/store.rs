//! Loading and persisting XML documents

use pip_fs::{NormalizedPath, io};

use crate::document::XmlDocument;
use crate::error::Result;

/// File-backed document store.
///
/// Writes replace the whole file atomically; there is no locking between
/// processes beyond the advisory lock held while the temp file is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlStore;

impl XmlStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and parse a document.
    ///
    /// # Errors
    ///
    /// Returns `Fs` if the file cannot be read and `InvalidFile` wrapping a
    /// `ParseError` if it is not well-formed.
    pub fn load(&self, path: &NormalizedPath) -> Result<XmlDocument> {
        let source = io::read_text(path)?;
        let document = XmlDocument::parse(&source).map_err(|e| e.in_file(path.to_native()))?;
        tracing::debug!(path = %path, "loaded XML document");
        Ok(document)
    }

    /// Render and atomically write a document.
    pub fn write(&self, document: &XmlDocument, path: &NormalizedPath) -> Result<()> {
        io::write_text(path, &document.render())?;
        tracing::debug!(path = %path, "wrote XML document");
        Ok(())
    }
}
