//! Persistence and concurrency control for the pathdb document
//!
//! Two layers:
//! - [`DocumentFile`]: loads and rewrites the backing JSON file. Loads are
//!   forgiving (a missing or corrupt file yields an empty document); writes
//!   are whole-document and crash-safe via write-then-rename.
//! - [`Store`]: owns the reader-writer lock and runs every request's
//!   load→operate→persist sequence as one critical section.
//!
//! The document is re-loaded from disk for every request rather than cached
//! across requests. That trades a parse per operation for never serving a
//! stale in-memory copy.

pub mod file;
pub mod store;

pub use file::DocumentFile;
pub use store::Store;
