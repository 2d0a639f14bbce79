//! Core types for pathdb
//!
//! This crate defines the foundational types used throughout the system:
//! - [`Document`]: the JSON document tree with path-addressed get/set/delete
//! - [`KeyPath`]: a resolved path of string segments into the document
//! - [`Error`]: the error taxonomy shared by the store and the server
//!
//! Everything here is pure: no I/O, no locks, no global state. The store
//! crate layers persistence and concurrency control on top.

pub mod document;
pub mod error;
pub mod path;

pub use document::Document;
pub use error::{Error, Result};
pub use path::KeyPath;
