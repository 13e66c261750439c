//! Persistence boundary for the contact collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the directory.
//! - Isolate file format and filesystem details from service orchestration.
//!
//! # Invariants
//! - `save` always replaces the full persisted collection.
//! - `load` treats a missing or unparsable backing file as an empty
//!   collection; other read failures are surfaced.

use crate::model::contact::Contact;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryContactStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for read/write failures that cannot be recovered silently.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "contact file `{}`: {source}", path.display()),
            Self::Lock { path, source } => {
                write!(f, "failed to lock `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode contacts: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Lock { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No backing file existed; collection starts empty.
    Missing,
    /// Backing file parsed successfully.
    Loaded,
    /// Backing file existed but did not parse; collection starts empty.
    RecoveredFromCorruption,
}

/// Load result with provenance, so callers can surface silent recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub contacts: Vec<Contact>,
    pub source: LoadSource,
}

/// Whole-collection persistence contract.
pub trait ContactStore {
    fn load(&self) -> StoreResult<Vec<Contact>>;
    fn save(&self, contacts: &[Contact]) -> StoreResult<()>;
}

impl<S: ContactStore + ?Sized> ContactStore for &S {
    fn load(&self) -> StoreResult<Vec<Contact>> {
        (**self).load()
    }

    fn save(&self, contacts: &[Contact]) -> StoreResult<()> {
        (**self).save(contacts)
    }
}
