//! Backing file access
//!
//! The whole document lives in a single JSON file. Writes use the
//! write-to-temp-then-rename pattern so a crash mid-write never leaves a
//! partial document at the final path: either the old complete file or the
//! new complete file is visible, nothing in between.

use pathdb_core::Document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the backing JSON file
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    /// Create a handle for the given file path
    ///
    /// The file itself is not touched until the first load or store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentFile { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document from disk
    ///
    /// A missing, empty, or unparseable file yields a fresh empty document,
    /// as does a file whose root is not a JSON object. Load failures are
    /// never surfaced to clients.
    pub fn load(&self) -> Document {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "backing file not readable, starting empty");
                return Document::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(root) => Document::from_value(root),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "backing file not parseable, starting empty");
                Document::new()
            }
        }
    }

    /// Rewrite the backing file with the full document
    ///
    /// Writes to a dot-prefixed temp file in the same directory, then
    /// renames over the final path.
    pub fn store(&self, doc: &Document) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.temp_path();
        let bytes = serde_json::to_vec_pretty(doc)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "db.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}
