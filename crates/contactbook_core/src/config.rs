//! Store configuration.
//!
//! # Responsibility
//! - Name the backing file and output formatting for `JsonFileStore`.
//! - Keep default values in one place for CLI and embedding callers.

use std::path::{Path, PathBuf};

/// Default backing file name, resolved relative to the working directory.
pub const DEFAULT_DATA_FILE_NAME: &str = "contacts.json";

/// Settings for the file-backed contact store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing JSON file.
    pub path: PathBuf,
    /// Indent output with four spaces. Compact output when `false`.
    pub pretty: bool,
}

impl StoreConfig {
    /// Creates a config for `path` with pretty output enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Places the default data file inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DATA_FILE_NAME))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE_NAME)
    }
}
