use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::error::{ContactError, ContactResult};
use crate::model::{ContactId, ContactRef, PhotoRef, RefTarget};

use super::{columns, Directory, PhotoSource, Row, Table};

/// A directory held entirely in memory.
///
/// Contacts are addressed by `content://contacts/<id>` references. Tables
/// can be marked as failing, which makes every lookup against them return
/// an error, the way a misbehaving provider would.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    primary: HashMap<String, Row>,
    details: HashMap<(String, Table), Vec<Row>>,
    photos: HashMap<PhotoRef, Vec<u8>>,
    failing: HashSet<Table>,
    fail_primary: bool,
    lookups: Cell<usize>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a contact and returns the reference a pick would
    /// hand back for it.
    pub fn add_contact(
        &mut self,
        id: &str,
        name: Option<&str>,
        photo: Option<&PhotoRef>,
    ) -> ContactRef {
        let row = Row::new()
            .with(columns::ID, id)
            .with(columns::DISPLAY_NAME, name)
            .with(columns::PHOTO_URI, photo.map(|p| p.as_str()));
        self.primary.insert(id.to_string(), row);
        ContactRef::for_id(id)
    }

    pub fn add_row(&mut self, table: Table, id: &str, row: Row) {
        self.details
            .entry((id.to_string(), table))
            .or_default()
            .push(row);
    }

    pub fn add_photo(&mut self, photo_ref: PhotoRef, bytes: Vec<u8>) {
        self.photos.insert(photo_ref, bytes);
    }

    /// Drops the contact and all of its detail rows.
    pub fn remove_contact(&mut self, id: &str) {
        self.primary.remove(id);
        self.details.retain(|(owner, _), _| owner != id);
    }

    pub fn fail_table(&mut self, table: Table) {
        self.failing.insert(table);
    }

    pub fn fail_primary(&mut self) {
        self.fail_primary = true;
    }

    /// Number of directory lookups served so far, primary and secondary.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    fn count(&self) {
        self.lookups.set(self.lookups.get() + 1);
    }
}

impl Directory for MemoryDirectory {
    fn query_primary(&self, contact_ref: &ContactRef) -> ContactResult<Option<Row>> {
        self.count();
        if self.fail_primary {
            return Err(ContactError::Other("primary lookup failed".into()));
        }

        let id = match contact_ref.target()? {
            RefTarget::ContactId(id) => id,
            RefTarget::LookupKey(_) => return Ok(None),
        };
        Ok(self.primary.get(&id).cloned())
    }

    fn query_by_contact_id(&self, table: Table, contact_id: &ContactId) -> ContactResult<Vec<Row>> {
        self.count();
        if self.failing.contains(&table) {
            return Err(ContactError::Other(format!("{} lookup failed", table)));
        }
        Ok(self
            .details
            .get(&(contact_id.value.clone(), table))
            .cloned()
            .unwrap_or_default())
    }
}

impl PhotoSource for MemoryDirectory {
    fn open_photo(&self, photo_ref: &PhotoRef) -> ContactResult<Vec<u8>> {
        self.photos
            .get(photo_ref)
            .cloned()
            .ok_or_else(|| ContactError::PhotoNotFound {
                reference: photo_ref.to_string(),
            })
    }
}
