//! Entry reconciliation for package installation plugin files
//!
//! This crate keeps project XML documents and the plugin table in sync:
//! - [`kind`] and [`pip`] describe entries through declarative bindings
//! - [`reconciler`] adds, edits, deletes and lists entries across documents
//! - [`serializer`] puts documents in canonical order before every write
//! - [`database`] installs documents into the plugin table and mirrors edits
//! - [`form`] validates submitted fields

pub mod database;
pub mod entry_list;
pub mod error;
pub mod fields;
pub mod form;
pub mod hooks;
pub mod identifier;
pub mod kind;
pub mod pip;
pub mod project;
pub mod reconciler;
pub mod serializer;

pub use database::{InstallAction, InstallReport, PipDatabaseSync, PipRow};
pub use entry_list::{EntryList, EntryListEntry, EntryListKeys};
pub use error::{Error, Result};
pub use fields::FieldMapping;
pub use form::PipFormValidator;
pub use hooks::{ElementDataListener, EntryHook, EntrySnapshot, NoopHook};
pub use identifier::IdentifierResolver;
pub use kind::{EntryKind, FieldBinding, FieldTarget};
pub use pip::PipEntryKind;
pub use project::ProjectXml;
pub use reconciler::{
    DeleteOutcome, EditOutcome, EntryReconciler, MultiDocumentReconciler, SingleDocumentReconciler,
};
pub use serializer::DocumentSorter;
