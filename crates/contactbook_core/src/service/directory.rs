//! Contact directory use-case service.
//!
//! # Responsibility
//! - Own the in-memory contact collection and the edit selection.
//! - Provide create/update/delete/search entry points for UI adapters.
//! - Persist the full collection through the store after every mutation.
//!
//! # Invariants
//! - Selection, when set, refers to a contact present in the collection.
//! - A failed validation never mutates or persists anything.
//! - A failed save is rolled back, so memory matches the last durable state.
//! - Positions are dense `0..len`; deletion shifts later contacts down.

use crate::model::contact::{Contact, ContactFields, ContactId, ContactValidationError};
use crate::search::name::search_by_name;
use crate::store::{ContactStore, StoreError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Service error for directory use-cases.
#[derive(Debug)]
pub enum DirectoryError {
    /// Input fields failed validation.
    Validation(ContactValidationError),
    /// Position is outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Operation needs a selected contact but none is set.
    NoSelection,
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "contact index {index} out of range (len {len})")
            }
            Self::NoSelection => write!(f, "no contact selected"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for DirectoryError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for DirectoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Whether `save_or_update` appended or replaced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// Result of `save_or_update`, used for status messaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub kind: SaveKind,
    pub contact: Contact,
}

/// Contact directory session over a store implementation.
pub struct Directory<S: ContactStore> {
    store: S,
    contacts: Vec<Contact>,
    selected: Option<ContactId>,
}

impl<S: ContactStore> Directory<S> {
    /// Loads the full collection from `store`.
    pub fn open(store: S) -> DirectoryResult<Self> {
        let contacts = store.load()?;
        Ok(Self::with_contacts(store, contacts))
    }

    /// Creates a directory over an already-loaded collection.
    ///
    /// Nothing is persisted until the first mutation. Nil or repeated ids
    /// (e.g. a record block duplicated by hand) are replaced with fresh ones
    /// so every position has its own identity.
    pub fn with_contacts(store: S, mut contacts: Vec<Contact>) -> Self {
        let reassigned = reassign_conflicting_ids(&mut contacts);
        if reassigned > 0 {
            warn!(
                "event=directory_open module=directory status=repaired reassigned_ids={reassigned}"
            );
        }
        info!(
            "event=directory_open module=directory status=ok count={}",
            contacts.len()
        );
        Self {
            store,
            contacts,
            selected: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current collection in display order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    /// Yields `(position, contact)` for contacts whose name contains
    /// `query`, ignoring case. Empty query yields everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = (usize, &'a Contact)> + 'a {
        search_by_name(&self.contacts, query)
    }

    /// Selects the contact at `index` for editing.
    ///
    /// # Errors
    /// - [`DirectoryError::IndexOutOfRange`] when `index >= len`. Selection
    ///   is left unchanged.
    pub fn select(&mut self, index: usize) -> DirectoryResult<&Contact> {
        let len = self.contacts.len();
        let Some(contact) = self.contacts.get(index) else {
            return Err(DirectoryError::IndexOutOfRange { index, len });
        };
        self.selected = Some(contact.id);
        Ok(contact)
    }

    /// Selects a contact by stable ID.
    pub fn select_id(&mut self, id: ContactId) -> DirectoryResult<&Contact> {
        let index = self.position(id).ok_or(DirectoryError::NotFound(id))?;
        self.select(index)
    }

    /// Currently selected contact, if any.
    pub fn selected(&self) -> Option<&Contact> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selected.and_then(|id| self.position(id))
    }

    /// Clears selection without touching the collection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Updates the selected contact, or appends a new one when nothing is
    /// selected, then persists the full collection.
    ///
    /// # Contract
    /// - Blank `name` fails with [`DirectoryError::Validation`]; nothing is
    ///   mutated or persisted.
    /// - Update keeps position and ID.
    /// - Selection state is not changed.
    pub fn save_or_update(&mut self, fields: ContactFields) -> DirectoryResult<SaveOutcome> {
        if let Err(err) = fields.validate() {
            warn!("event=contact_save module=directory status=rejected reason={err}");
            return Err(err.into());
        }

        match self.selected {
            Some(id) => self.update_selected(id, fields),
            None => self.create(fields),
        }
    }

    /// Removes the selected contact, persists, and clears selection.
    ///
    /// Confirmation must be obtained by the caller before this is invoked.
    ///
    /// # Errors
    /// - [`DirectoryError::NoSelection`] when nothing is selected.
    pub fn delete_selected(&mut self) -> DirectoryResult<Contact> {
        let id = self.selected.ok_or(DirectoryError::NoSelection)?;
        let index = self.live_selection(id)?;

        let removed = self.contacts.remove(index);
        if let Err(err) = self.persist("delete") {
            self.contacts.insert(index, removed);
            return Err(err.into());
        }

        self.selected = None;
        info!(
            "event=contact_delete module=directory status=ok id={} index={} count={}",
            removed.id,
            index,
            self.contacts.len()
        );
        Ok(removed)
    }

    fn create(&mut self, fields: ContactFields) -> DirectoryResult<SaveOutcome> {
        let contact = Contact::new(fields)?;
        self.contacts.push(contact);
        if let Err(err) = self.persist("create") {
            self.contacts.pop();
            return Err(err.into());
        }

        let contact = self.contacts[self.contacts.len() - 1].clone();
        info!(
            "event=contact_save module=directory status=ok kind=created id={} count={}",
            contact.id,
            self.contacts.len()
        );
        Ok(SaveOutcome {
            kind: SaveKind::Created,
            contact,
        })
    }

    fn update_selected(
        &mut self,
        id: ContactId,
        fields: ContactFields,
    ) -> DirectoryResult<SaveOutcome> {
        let index = self.live_selection(id)?;

        let previous = self.contacts[index].clone();
        self.contacts[index].apply(fields)?;
        if let Err(err) = self.persist("update") {
            self.contacts[index] = previous;
            return Err(err.into());
        }

        info!(
            "event=contact_save module=directory status=ok kind=updated id={id} index={index}"
        );
        Ok(SaveOutcome {
            kind: SaveKind::Updated,
            contact: self.contacts[index].clone(),
        })
    }

    /// Resolves the selected ID to a position, clearing a stale selection.
    fn live_selection(&mut self, id: ContactId) -> DirectoryResult<usize> {
        match self.position(id) {
            Some(index) => Ok(index),
            None => {
                self.selected = None;
                Err(DirectoryError::NotFound(id))
            }
        }
    }

    fn persist(&self, op: &str) -> Result<(), StoreError> {
        self.store.save(&self.contacts).map_err(|err| {
            error!(
                "event=directory_persist module=directory status=error op={op} error={err}"
            );
            err
        })
    }
}

/// Gives a fresh id to every contact whose id is nil or already taken by an
/// earlier contact. Returns how many ids changed.
fn reassign_conflicting_ids(contacts: &mut [Contact]) -> usize {
    let mut seen = HashSet::with_capacity(contacts.len());
    let mut reassigned = 0;
    for contact in contacts.iter_mut() {
        while contact.id.is_nil() || !seen.insert(contact.id) {
            contact.id = Uuid::new_v4();
            reassigned += 1;
        }
    }
    reassigned
}
