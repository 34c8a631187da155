//! Reconciling entry edits with project XML documents
//!
//! Both strategies delegate to [`ReconcilerCore`]; they differ only in how
//! many documents they manage and how a missing entry is reported.

mod multi;
mod shared;
mod single;

pub use shared::ReconcilerCore;
pub use multi::MultiDocumentReconciler;
pub use single::SingleDocumentReconciler;

use serde::Serialize;

use crate::entry_list::{EntryList, EntryListKeys};
use crate::error::Result;
use crate::fields::FieldMapping;
use crate::hooks::{ElementDataListener, EntrySnapshot};
use crate::project::ProjectXml;

/// Result of an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    /// Identifier of the replacement entry
    pub identifier: String,
    /// Some managed document did not contain the entry
    pub partial: bool,
}

/// Result of a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Number of documents the entry was removed from
    pub removed: usize,
    pub partial: bool,
}

/// Add, edit, delete and list entries in managed documents.
///
/// Every mutation normalizes and writes each document it touched.
pub trait EntryReconciler {
    fn add_entry(&mut self, fields: &FieldMapping) -> Result<()>;

    fn edit_entry(&mut self, fields: &FieldMapping, identifier: &str) -> Result<EditOutcome>;

    fn delete_entry(&mut self, identifier: &str) -> Result<DeleteOutcome>;

    /// Resolve the entry about to be edited and remember its current state.
    fn set_edited_entry_identifier(&mut self, identifier: &str) -> Result<()>;

    /// Snapshots cached by the last successful
    /// [`EntryReconciler::set_edited_entry_identifier`].
    fn edited_entries(&self) -> &[EntrySnapshot];

    fn entry_data(&self, identifier: &str) -> Option<FieldMapping>;

    fn entry_list(&self, keys: &EntryListKeys) -> EntryList;

    fn add_listener(&mut self, listener: Box<dyn ElementDataListener>);

    fn projects(&self) -> &[ProjectXml];
}
