//! JSON file-backed contact store.
//!
//! # Responsibility
//! - Round-trip the full contact collection through one JSON file.
//! - Replace the file atomically on every save.
//!
//! # Invariants
//! - Saves go to a sibling temp file first and are renamed over the target,
//!   so readers never observe a half-written collection.
//! - An exclusive lock on `<file>.lock` is held for the whole write and
//!   released when the guard drops.
//! - Corrupt content is logged and treated as an empty collection.

use super::{ContactStore, LoadReport, LoadSource, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::contact::Contact;
use fs2::FileExt;
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Contact store persisting to a single JSON array file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    /// Creates a store for `path` with default formatting.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(StoreConfig::new(path))
    }

    pub fn from_config(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        self.config.path.as_path()
    }

    /// Loads the collection and reports how it was obtained.
    ///
    /// # Errors
    /// - Returns [`StoreError::Io`] when the file exists but cannot be read
    ///   for reasons other than its content (e.g. permissions).
    pub fn load_report(&self) -> StoreResult<LoadReport> {
        let path = self.path();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=store status=ok source=missing path={}",
                    path.display()
                );
                return Ok(LoadReport {
                    contacts: Vec::new(),
                    source: LoadSource::Missing,
                });
            }
            // Not valid UTF-8: a content problem, same as unparsable JSON.
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Ok(recovered(path, &err.to_string()));
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error={}",
                    path.display(),
                    err
                );
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match serde_json::from_str::<Vec<Contact>>(&text) {
            Ok(contacts) => {
                info!(
                    "event=store_load module=store status=ok source=file count={}",
                    contacts.len()
                );
                Ok(LoadReport {
                    contacts,
                    source: LoadSource::Loaded,
                })
            }
            Err(err) => Ok(recovered(
                path,
                &format!("line={} column={} {}", err.line(), err.column(), err),
            )),
        }
    }

    fn encode(&self, contacts: &[Contact]) -> StoreResult<Vec<u8>> {
        if !self.config.pretty {
            return Ok(serde_json::to_vec(contacts)?);
        }
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        contacts.serialize(&mut serializer)?;
        Ok(buf)
    }
}

impl ContactStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Contact>> {
        self.load_report().map(|report| report.contacts)
    }

    fn save(&self, contacts: &[Contact]) -> StoreResult<()> {
        let started_at = Instant::now();
        let path = self.path();
        let payload = self.encode(contacts)?;

        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
        }

        let _lock = WriteLock::acquire(&sibling(path, ".lock"))?;
        let tmp_path = sibling(path, ".tmp");
        if let Err(err) = write_synced(&tmp_path, &payload) {
            let _ = fs::remove_file(&tmp_path);
            error!(
                "event=store_save module=store status=error stage=write path={} error={}",
                tmp_path.display(),
                err
            );
            return Err(err);
        }
        if let Err(err) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            error!(
                "event=store_save module=store status=error stage=rename path={} error={}",
                path.display(),
                err
            );
            return Err(io_error(path, err));
        }

        info!(
            "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
            contacts.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Exclusive advisory lock held for the duration of one save.
struct WriteLock {
    file: File,
    path: PathBuf,
}

impl WriteLock {
    fn acquire(path: &Path) -> StoreResult<Self> {
        let lock_error = |source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(lock_error)?;
        FileExt::lock_exclusive(&file).map_err(lock_error)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            warn!(
                "event=store_unlock module=store status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }
}

fn recovered(path: &Path, detail: &str) -> LoadReport {
    warn!(
        "event=store_load module=store status=recovered source=corrupt path={} detail={}",
        path.display(),
        detail
    );
    LoadReport {
        contacts: Vec::new(),
        source: LoadSource::RecoveredFromCorruption,
    }
}

fn write_synced(path: &Path, payload: &[u8]) -> StoreResult<()> {
    let mut file = File::create(path).map_err(|err| io_error(path, err))?;
    file.write_all(payload).map_err(|err| io_error(path, err))?;
    file.sync_all().map_err(|err| io_error(path, err))?;
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
