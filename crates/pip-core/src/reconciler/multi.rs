use crate::entry_list::{EntryList, EntryListKeys};
use crate::error::{Error, Result};
use crate::fields::FieldMapping;
use crate::hooks::{ElementDataListener, EntryHook, EntrySnapshot};
use crate::kind::EntryKind;
use crate::project::ProjectXml;

use super::{DeleteOutcome, EditOutcome, EntryReconciler, ReconcilerCore};

/// Reconciler over several project documents sharing one schema.
///
/// Mutations are applied to every document. An entry missing from some of
/// them is reported through the `partial` flag instead of failing.
pub struct MultiDocumentReconciler<K, H> {
    core: ReconcilerCore<K, H>,
    projects: Vec<ProjectXml>,
}

impl<K: EntryKind, H: EntryHook> MultiDocumentReconciler<K, H> {
    /// # Errors
    ///
    /// Returns `NoDocuments` if `projects` is empty.
    pub fn new(kind: K, hook: H, projects: Vec<ProjectXml>) -> Result<Self> {
        if projects.is_empty() {
            return Err(Error::NoDocuments);
        }
        Ok(Self {
            core: ReconcilerCore::new(kind, hook),
            projects,
        })
    }

    pub fn core(&self) -> &ReconcilerCore<K, H> {
        &self.core
    }

    pub fn into_parts(self) -> (Vec<ProjectXml>, H) {
        (self.projects, self.core.into_hook())
    }
}

impl<K: EntryKind, H: EntryHook> EntryReconciler for MultiDocumentReconciler<K, H> {
    fn add_entry(&mut self, fields: &FieldMapping) -> Result<()> {
        let element = self.core.build_element(fields)?;
        for project in &mut self.projects {
            self.core.insert(project, element.clone())?;
        }
        Ok(())
    }

    fn edit_entry(&mut self, fields: &FieldMapping, identifier: &str) -> Result<EditOutcome> {
        let element = self.core.build_element(fields)?;

        let mut edited = None;
        let mut missing = 0;
        for project in &mut self.projects {
            match self.core.replace(project, identifier, element.clone())? {
                Some(new) => edited = Some(new),
                None => missing += 1,
            }
        }

        let new = edited.ok_or_else(|| Error::NoEntryEdited {
            identifier: identifier.to_string(),
        })?;
        self.core.finish_edit(identifier);

        let partial = missing > 0;
        if partial {
            tracing::warn!(identifier, missing, "entry missing from some project documents");
        }
        Ok(EditOutcome {
            identifier: new.identifier,
            partial,
        })
    }

    fn delete_entry(&mut self, identifier: &str) -> Result<DeleteOutcome> {
        let mut removed = 0;
        for project in &mut self.projects {
            if self.core.remove(project, identifier)?.is_some() {
                removed += 1;
            }
        }

        if removed == 0 {
            return Err(Error::UnknownIdentifier {
                identifier: identifier.to_string(),
            });
        }
        let partial = removed < self.projects.len();
        if partial {
            tracing::warn!(identifier, removed, "entry missing from some project documents");
        }
        Ok(DeleteOutcome { removed, partial })
    }

    fn set_edited_entry_identifier(&mut self, identifier: &str) -> Result<()> {
        match self.core.resolve_edited(&self.projects, identifier) {
            0 => Err(Error::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn edited_entries(&self) -> &[EntrySnapshot] {
        self.core.edited_entries()
    }

    fn entry_data(&self, identifier: &str) -> Option<FieldMapping> {
        self.core.entry_data(&self.projects, identifier)
    }

    fn entry_list(&self, keys: &EntryListKeys) -> EntryList {
        self.core.entry_list(&self.projects, keys)
    }

    fn add_listener(&mut self, listener: Box<dyn ElementDataListener>) {
        self.core.add_listener(listener);
    }

    fn projects(&self) -> &[ProjectXml] {
        &self.projects
    }
}
