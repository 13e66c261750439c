//! In-memory contact store.
//!
//! Keeps the last saved collection in process memory. Used by tests and by
//! callers that embed the directory without a backing file.

use super::{ContactStore, StoreError, StoreResult};
use crate::model::contact::Contact;
use std::cell::{Cell, RefCell};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RefCell<Vec<Contact>>,
    save_count: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store as if `contacts` had been saved earlier.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RefCell::new(contacts),
            ..Self::default()
        }
    }

    /// Copy of the last saved collection.
    pub fn snapshot(&self) -> Vec<Contact> {
        self.contacts.borrow().clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    /// Makes every following `save` fail until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl ContactStore for MemoryContactStore {
    fn load(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.snapshot())
    }

    fn save(&self, contacts: &[Contact]) -> StoreResult<()> {
        if self.fail_saves.get() {
            return Err(StoreError::Io {
                path: PathBuf::from(":memory:"),
                source: std::io::Error::new(ErrorKind::Other, "save rejected"),
            });
        }
        *self.contacts.borrow_mut() = contacts.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}
