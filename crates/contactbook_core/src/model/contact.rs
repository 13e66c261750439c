//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its editable field set.
//! - Validate write-side input before it reaches the directory.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - `name` is non-blank for every record created or updated through core.
//! - All four text fields are always present, even when empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one contact record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = Uuid;

/// Validation error for contact write input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// Caller supplied `Uuid::nil()` as record identity.
    NilId,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::NilId => write!(f, "contact id must not be nil"),
        }
    }
}

impl Error for ContactValidationError {}

/// Editable contact fields as entered by the user.
///
/// This is the input shape for create/update; identity is owned by core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl ContactFields {
    /// Creates a field set with only `name` filled in.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validates write-side invariants.
    ///
    /// # Errors
    /// - [`ContactValidationError::EmptyName`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Canonical persisted contact record.
///
/// The file format carries `id` in addition to the four text keys
/// `name`, `phone`, `email` and `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Files written before ids existed get a fresh id on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    /// Creates a validated contact with a generated stable ID.
    pub fn new(fields: ContactFields) -> Result<Self, ContactValidationError> {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Creates a validated contact with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - [`ContactValidationError::NilId`] for `Uuid::nil()`.
    /// - [`ContactValidationError::EmptyName`] for a blank name.
    pub fn with_id(id: ContactId, fields: ContactFields) -> Result<Self, ContactValidationError> {
        if id.is_nil() {
            return Err(ContactValidationError::NilId);
        }
        fields.validate()?;
        let ContactFields {
            name,
            phone,
            email,
            address,
        } = fields;
        Ok(Self {
            id,
            name,
            phone,
            email,
            address,
        })
    }

    /// Replaces all editable fields, keeping identity.
    pub fn apply(&mut self, fields: ContactFields) -> Result<(), ContactValidationError> {
        fields.validate()?;
        self.name = fields.name;
        self.phone = fields.phone;
        self.email = fields.email;
        self.address = fields.address;
        Ok(())
    }

    /// Returns a copy of the editable fields, e.g. to populate an edit form.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}
