//! Project XML files under management

use pip_fs::{NormalizedPath, io};
use pip_xml::{TextDiffReport, XmlDocument, XmlStore};

use crate::error::{Error, Result};
use crate::kind::EntryKind;

const ROOT_NAME: &str = "data";

/// A project document together with the file it is persisted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectXml {
    path: NormalizedPath,
    document: XmlDocument,
}

impl ProjectXml {
    pub fn new(path: NormalizedPath, document: XmlDocument) -> Self {
        Self { path, document }
    }

    /// Load an existing project file.
    ///
    /// # Errors
    ///
    /// Returns `Xml` if the file cannot be read or parsed and
    /// `InvalidDocument` if its root is not `<data>`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let document = XmlStore::new().load(path)?;
        if document.root().local_name() != ROOT_NAME {
            return Err(Error::InvalidDocument {
                path: path.to_string(),
                message: format!(
                    "expected root element <{ROOT_NAME}>, found <{}>",
                    document.root().name()
                ),
            });
        }
        Ok(Self::new(path.clone(), document))
    }

    /// Load the document, or start from an empty one if the file does not
    /// exist yet. Nothing is written until the first mutation.
    pub fn load_or_create<K: EntryKind + ?Sized>(path: &NormalizedPath, kind: &K) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        tracing::info!(path = %path, "project file missing, starting from an empty document");
        Ok(Self::new(path.clone(), kind.empty_document()))
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut XmlDocument {
        &mut self.document
    }

    /// Normalize and persist the document.
    pub fn write<K: EntryKind + ?Sized>(&mut self, kind: &K) -> Result<()> {
        kind.sort_document(&mut self.document);
        XmlStore::new().write(&self.document, &self.path)?;
        Ok(())
    }

    /// Rewrite the file in canonical order without changing entries.
    ///
    /// Returns whether the file content changed.
    pub fn normalize<K: EntryKind + ?Sized>(&mut self, kind: &K) -> Result<bool> {
        let report = self.normalization_diff(kind)?;
        if report.is_equivalent {
            return Ok(false);
        }
        self.write(kind)?;
        Ok(true)
    }

    /// Diff between the file on disk and its normalized rendering.
    pub fn normalization_diff<K: EntryKind + ?Sized>(&self, kind: &K) -> Result<TextDiffReport> {
        let current = if self.path.exists() {
            io::read_text(&self.path)?
        } else {
            String::new()
        };
        let mut normalized = self.document.clone();
        kind.sort_document(&mut normalized);
        let label = self.path.file_name().unwrap_or(self.path.as_str());
        Ok(TextDiffReport::compute(&current, &normalized.render(), label))
    }
}
