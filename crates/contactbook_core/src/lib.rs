//! Core domain logic for ContactBook.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DEFAULT_DATA_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactFields, ContactId, ContactValidationError};
pub use search::name::{search_by_name, NameQuery};
pub use service::directory::{Directory, DirectoryError, DirectoryResult, SaveKind, SaveOutcome};
pub use store::{
    ContactStore, JsonFileStore, LoadReport, LoadSource, MemoryContactStore, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
