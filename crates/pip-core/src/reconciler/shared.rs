//! Shared reconciliation logic

use pip_xml::{Element, Node, XmlDocument};

use crate::entry_list::{EntryList, EntryListKeys};
use crate::error::{Error, Result};
use crate::fields::FieldMapping;
use crate::hooks::{ElementDataListener, EntryHook, EntrySnapshot};
use crate::identifier::IdentifierResolver;
use crate::kind::{self, EntryKind};
use crate::project::ProjectXml;
use crate::serializer::{self, DELETE};

/// The entry targeted by `set_edited_entry_identifier`.
#[derive(Debug, Clone)]
struct EditedEntry {
    identifier: String,
    snapshots: Vec<EntrySnapshot>,
}

/// Per-document operations shared by the reconciler strategies.
pub struct ReconcilerCore<K, H> {
    kind: K,
    resolver: IdentifierResolver,
    hook: H,
    listeners: Vec<Box<dyn ElementDataListener>>,
    edited: Option<EditedEntry>,
}

impl<K: EntryKind, H: EntryHook> ReconcilerCore<K, H> {
    pub fn new(kind: K, hook: H) -> Self {
        let resolver = kind.resolver();
        Self {
            kind,
            resolver,
            hook,
            listeners: Vec::new(),
            edited: None,
        }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn resolver(&self) -> &IdentifierResolver {
        &self.resolver
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn into_hook(self) -> H {
        self.hook
    }

    pub fn add_listener(&mut self, listener: Box<dyn ElementDataListener>) {
        self.listeners.push(listener);
    }

    /// Build an entry element from submitted fields.
    pub fn build_element(&self, fields: &FieldMapping) -> Result<Element> {
        kind::build_element(&self.kind, fields).map_err(|field| Error::MissingField { field })
    }

    /// Read the data of an entry element, letting listeners amend it when
    /// `notify` is set.
    pub fn fetch_element_data(&self, element: &Element, notify: bool) -> FieldMapping {
        let mut data = kind::read_element(&self.kind, element);
        if notify {
            for listener in &self.listeners {
                listener.did_fetch_element_data(element, &mut data);
            }
        }
        data
    }

    fn snapshot(&self, project: &ProjectXml, element: Element, notify: bool) -> EntrySnapshot {
        EntrySnapshot {
            path: project.path().clone(),
            identifier: self.resolver.identifier_of(&element),
            data: self.fetch_element_data(&element, notify),
            element,
        }
    }

    /// Append a new entry to the document.
    pub fn insert(&mut self, project: &mut ProjectXml, element: Element) -> Result<EntrySnapshot> {
        let backup = project.document().clone();
        let new = self.snapshot(project, element.clone(), true);
        self.kind.insert_element(project.document_mut().root_mut(), element);
        self.clear_deletion_marker(project, &new.identifier);

        self.commit(project, backup, |hook| hook.save_object(&new, None))?;
        tracing::debug!(path = %project.path(), identifier = %new.identifier, "added entry");
        Ok(new)
    }

    /// Replace the entry with `identifier` in place. `Ok(None)` if the
    /// document does not contain it.
    pub fn replace(
        &mut self,
        project: &mut ProjectXml,
        identifier: &str,
        element: Element,
    ) -> Result<Option<EntrySnapshot>> {
        let Some(location) = self.resolver.locate(project.document(), identifier) else {
            return Ok(None);
        };
        let backup = project.document().clone();
        let Some(current) = self.resolver.element_at_mut(project.document_mut(), location) else {
            return Ok(None);
        };
        let previous = std::mem::replace(current, element.clone());

        let old = match self.cached_snapshot(project, identifier) {
            Some(cached) => cached,
            None => self.snapshot(project, previous, true),
        };
        let new = self.snapshot(project, element, true);
        self.clear_deletion_marker(project, &new.identifier);

        self.commit(project, backup, |hook| hook.save_object(&new, Some(&old)))?;
        tracing::debug!(
            path = %project.path(),
            old = %old.identifier,
            new = %new.identifier,
            "edited entry"
        );
        Ok(Some(new))
    }

    /// Remove the entry and record a deletion marker for it. `Ok(None)` if
    /// the document does not contain it.
    pub fn remove(&mut self, project: &mut ProjectXml, identifier: &str) -> Result<Option<EntrySnapshot>> {
        let Some(location) = self.resolver.locate(project.document(), identifier) else {
            return Ok(None);
        };
        let backup = project.document().clone();
        let Some(removed) = self.resolver.remove_at(project.document_mut(), location) else {
            return Ok(None);
        };
        let old = self.snapshot(project, removed, true);
        self.add_deletion_marker(project, identifier);

        self.commit(project, backup, |hook| hook.delete_object(&old))?;
        tracing::debug!(path = %project.path(), identifier, "deleted entry");
        Ok(Some(old))
    }

    /// Run the hook and persist the mutated document. On failure the
    /// document is reset to `backup` so a later write cannot pick up the
    /// rejected change.
    fn commit(
        &mut self,
        project: &mut ProjectXml,
        backup: XmlDocument,
        notify: impl FnOnce(&mut H) -> Result<()>,
    ) -> Result<()> {
        let result = notify(&mut self.hook).and_then(|()| project.write(&self.kind));
        if result.is_err() {
            *project.document_mut() = backup;
        }
        result
    }

    /// Resolve and cache the entry in every document. Returns the number of
    /// documents containing it; nothing is cached when that is zero.
    pub fn resolve_edited(&mut self, projects: &[ProjectXml], identifier: &str) -> usize {
        let snapshots: Vec<EntrySnapshot> = projects
            .iter()
            .filter_map(|project| {
                let element = self
                    .resolver
                    .find_by_identifier(project.document(), identifier)?;
                Some(self.snapshot(project, element.clone(), true))
            })
            .collect();

        let found = snapshots.len();
        self.edited = (found > 0).then(|| EditedEntry {
            identifier: identifier.to_string(),
            snapshots,
        });
        found
    }

    pub fn edited_entries(&self) -> &[EntrySnapshot] {
        self.edited
            .as_ref()
            .map(|edited| edited.snapshots.as_slice())
            .unwrap_or_default()
    }

    /// Forget the cached entry once an edit of it went through.
    pub fn finish_edit(&mut self, identifier: &str) {
        if self
            .edited
            .as_ref()
            .is_some_and(|edited| edited.identifier == identifier)
        {
            self.edited = None;
        }
    }

    fn cached_snapshot(&self, project: &ProjectXml, identifier: &str) -> Option<EntrySnapshot> {
        let edited = self.edited.as_ref().filter(|e| e.identifier == identifier)?;
        edited
            .snapshots
            .iter()
            .find(|snapshot| snapshot.path == *project.path())
            .cloned()
    }

    /// Element data merged over all documents containing the entry.
    pub fn entry_data(&self, projects: &[ProjectXml], identifier: &str) -> Option<FieldMapping> {
        let mut merged: Option<FieldMapping> = None;
        for project in projects {
            if let Some(element) = self.resolver.find_by_identifier(project.document(), identifier) {
                let data = self.fetch_element_data(element, true);
                merged.get_or_insert_with(FieldMapping::new).merge(&data);
            }
        }
        merged
    }

    pub fn entry_list(&self, projects: &[ProjectXml], keys: &EntryListKeys) -> EntryList {
        let mut list = EntryList::new(keys.clone());
        for project in projects {
            for element in self.resolver.import_entries(project.document()) {
                let identifier = self.resolver.identifier_of(element);
                if list.get(&identifier).is_some() {
                    continue;
                }
                list.add_entry(identifier, &self.fetch_element_data(element, false));
            }
        }
        list
    }

    fn clear_deletion_marker(&self, project: &mut ProjectXml, identifier: &str) {
        while let Some(location) = self.resolver.locate_marker(project.document(), identifier) {
            self.resolver.remove_at(project.document_mut(), location);
            let root = project.document_mut().root_mut();
            let emptied = root
                .children()
                .get(location.container)
                .and_then(Node::as_element)
                .is_some_and(|container| !container.has_children());
            if emptied {
                root.children_mut().remove(location.container);
            }
        }
    }

    fn add_deletion_marker(&self, project: &mut ProjectXml, identifier: &str) {
        if self
            .resolver
            .locate_marker(project.document(), identifier)
            .is_some()
        {
            return;
        }
        let marker = Element::new(self.resolver.tag_name())
            .with_attribute(self.resolver.attribute(), identifier);
        let root = project.document_mut().root_mut();
        let index = serializer::ensure_container(root, DELETE);
        if let Some(container) = root.children_mut()[index].as_element_mut() {
            container.append_child(marker);
        }
    }
}
