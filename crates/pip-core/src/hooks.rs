//! Hooks invoked around document mutations

use pip_fs::NormalizedPath;
use pip_xml::Element;

use crate::error::Result;
use crate::fields::FieldMapping;

/// An entry as seen at one point of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    /// Path of the document holding the entry
    pub path: NormalizedPath,
    pub identifier: String,
    pub element: Element,
    pub data: FieldMapping,
}

/// Receives entries after they were written to or removed from a document.
///
/// `save_object` gets the previous state on edits and `None` on additions.
pub trait EntryHook {
    fn save_object(&mut self, new: &EntrySnapshot, old: Option<&EntrySnapshot>) -> Result<()>;

    fn delete_object(&mut self, old: &EntrySnapshot) -> Result<()>;
}

/// Hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl EntryHook for NoopHook {
    fn save_object(&mut self, _new: &EntrySnapshot, _old: Option<&EntrySnapshot>) -> Result<()> {
        Ok(())
    }

    fn delete_object(&mut self, _old: &EntrySnapshot) -> Result<()> {
        Ok(())
    }
}

impl<H: EntryHook + ?Sized> EntryHook for &mut H {
    fn save_object(&mut self, new: &EntrySnapshot, old: Option<&EntrySnapshot>) -> Result<()> {
        (**self).save_object(new, old)
    }

    fn delete_object(&mut self, old: &EntrySnapshot) -> Result<()> {
        (**self).delete_object(old)
    }
}

/// Observes and may amend entry data each time it is extracted for a
/// mutation. Listings do not notify listeners.
pub trait ElementDataListener {
    fn did_fetch_element_data(&self, element: &Element, data: &mut FieldMapping);
}

impl<F> ElementDataListener for F
where
    F: Fn(&Element, &mut FieldMapping),
{
    fn did_fetch_element_data(&self, element: &Element, data: &mut FieldMapping) {
        self(element, data)
    }
}
