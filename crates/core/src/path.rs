//! Key path resolution
//!
//! A client addresses a location in the document with a single `key` string.
//! The string is resolved into a [`KeyPath`], an ordered list of segments,
//! as follows:
//!
//! 1. If the string parses as a JSON array of strings, that array is the
//!    path. An empty array is rejected as an invalid key.
//! 2. Any other string (including the empty string, and anything that is
//!    JSON but not an array of strings) is a one-segment path equal to the
//!    raw string.
//!
//! So `"name"` addresses the top-level key `name`, while
//! `["person","address","city"]` addresses `document.person.address.city`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved path into the document
///
/// Segments are plain object keys; `["a","b"]` addresses `document.a.b`.
/// A `KeyPath` produced by [`KeyPath::resolve`] is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Resolve a raw key string into a path
    ///
    /// Returns `Error::InvalidKey` only for a key that parses as an empty
    /// JSON array; every other string yields a non-empty path.
    pub fn resolve(raw: &str) -> Result<Self> {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(segments) if segments.is_empty() => Err(Error::InvalidKey),
            Ok(segments) => Ok(KeyPath { segments }),
            Err(_) => Ok(KeyPath {
                segments: vec![raw.to_string()],
            }),
        }
    }

    /// Build a path directly from segments (primarily for tests and
    /// programmatic callers). Callers are expected to pass at least one
    /// segment; an empty path addresses nothing.
    pub fn from_segments(segments: Vec<String>) -> Self {
        KeyPath { segments }
    }

    /// The path segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into (all but last, last). `None` for an empty path.
    pub fn split_last(&self) -> Option<(&[String], &String)> {
        self.segments.split_last().map(|(last, init)| (init, last))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
