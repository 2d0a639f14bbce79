//! Lock-guarded document store
//!
//! [`Store`] serializes access to the backing file with a single
//! process-wide reader-writer lock. The lock is scoped over the *entire*
//! load→operate→persist sequence of a request, not just the file I/O:
//!
//! - `get` holds the read lock across load and lookup, so concurrent reads
//!   proceed in parallel and never observe a half-applied write.
//! - `set` and `delete` hold the write lock across load, mutation, and
//!   persist as one atomic critical section. Releasing between load and
//!   persist would permit lost updates under concurrent writers.

use crate::file::DocumentFile;
use parking_lot::RwLock;
use pathdb_core::{KeyPath, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// The document store: backing file + reader-writer lock
///
/// Constructed once at process start and shared (via `Arc`) with every
/// connection handler. There is no long-lived in-memory document: each
/// operation loads fresh from disk inside its critical section.
pub struct Store {
    file: DocumentFile,
    lock: RwLock<()>,
}

impl Store {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            file: DocumentFile::new(path),
            lock: RwLock::new(()),
        }
    }

    /// Look up the value at `path`
    ///
    /// Read lock over load + lookup. `Ok(None)` means no value exists at
    /// the path.
    pub fn get(&self, path: &KeyPath) -> Result<Option<Value>> {
        let _guard = self.lock.read();
        let doc = self.file.load();
        Ok(doc.get(path).cloned())
    }

    /// Assign `value` at `path` and persist the document
    ///
    /// Write lock over load + mutate + persist.
    pub fn set(&self, path: &KeyPath, value: Value) -> Result<()> {
        let _guard = self.lock.write();
        let mut doc = self.file.load();
        doc.set(path, value);
        self.file.store(&doc)?;
        debug!(%path, "set persisted");
        Ok(())
    }

    /// Remove the value at `path`, persisting only if something was removed
    ///
    /// Write lock over load + mutate + persist. Returns `Ok(false)` and
    /// leaves the file untouched when the path is absent.
    pub fn delete(&self, path: &KeyPath) -> Result<bool> {
        let _guard = self.lock.write();
        let mut doc = self.file.load();
        if !doc.delete(path) {
            return Ok(false);
        }
        self.file.store(&doc)?;
        debug!(%path, "delete persisted");
        Ok(true)
    }
}
