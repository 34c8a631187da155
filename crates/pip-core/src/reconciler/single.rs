use std::slice;

use crate::entry_list::{EntryList, EntryListKeys};
use crate::error::{Error, Result};
use crate::fields::FieldMapping;
use crate::hooks::{ElementDataListener, EntryHook, EntrySnapshot};
use crate::kind::EntryKind;
use crate::project::ProjectXml;

use super::{DeleteOutcome, EditOutcome, EntryReconciler, ReconcilerCore};

/// Reconciler over exactly one project document.
///
/// An identifier missing from the document is always an error.
pub struct SingleDocumentReconciler<K, H> {
    core: ReconcilerCore<K, H>,
    project: ProjectXml,
}

impl<K: EntryKind, H: EntryHook> SingleDocumentReconciler<K, H> {
    pub fn new(kind: K, hook: H, project: ProjectXml) -> Self {
        Self {
            core: ReconcilerCore::new(kind, hook),
            project,
        }
    }

    pub fn core(&self) -> &ReconcilerCore<K, H> {
        &self.core
    }

    pub fn project(&self) -> &ProjectXml {
        &self.project
    }

    pub fn into_parts(self) -> (ProjectXml, H) {
        (self.project, self.core.into_hook())
    }

    fn unknown(identifier: &str) -> Error {
        Error::UnknownIdentifier {
            identifier: identifier.to_string(),
        }
    }
}

impl<K: EntryKind, H: EntryHook> EntryReconciler for SingleDocumentReconciler<K, H> {
    fn add_entry(&mut self, fields: &FieldMapping) -> Result<()> {
        let element = self.core.build_element(fields)?;
        self.core.insert(&mut self.project, element)?;
        Ok(())
    }

    fn edit_entry(&mut self, fields: &FieldMapping, identifier: &str) -> Result<EditOutcome> {
        let element = self.core.build_element(fields)?;
        let new = self
            .core
            .replace(&mut self.project, identifier, element)?
            .ok_or_else(|| Self::unknown(identifier))?;
        self.core.finish_edit(identifier);
        Ok(EditOutcome {
            identifier: new.identifier,
            partial: false,
        })
    }

    fn delete_entry(&mut self, identifier: &str) -> Result<DeleteOutcome> {
        self.core
            .remove(&mut self.project, identifier)?
            .ok_or_else(|| Self::unknown(identifier))?;
        Ok(DeleteOutcome {
            removed: 1,
            partial: false,
        })
    }

    fn set_edited_entry_identifier(&mut self, identifier: &str) -> Result<()> {
        match self
            .core
            .resolve_edited(slice::from_ref(&self.project), identifier)
        {
            0 => Err(Self::unknown(identifier)),
            _ => Ok(()),
        }
    }

    fn edited_entries(&self) -> &[EntrySnapshot] {
        self.core.edited_entries()
    }

    fn entry_data(&self, identifier: &str) -> Option<FieldMapping> {
        self.core
            .entry_data(slice::from_ref(&self.project), identifier)
    }

    fn entry_list(&self, keys: &EntryListKeys) -> EntryList {
        self.core.entry_list(slice::from_ref(&self.project), keys)
    }

    fn add_listener(&mut self, listener: Box<dyn ElementDataListener>) {
        self.core.add_listener(listener);
    }

    fn projects(&self) -> &[ProjectXml] {
        slice::from_ref(&self.project)
    }
}
