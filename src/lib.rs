//! pathdb - a path-addressed JSON document store served over a socket
//!
//! A single JSON document, durably mirrored to a file, read and written by
//! remote clients through a one-request-per-connection socket protocol.
//! Values are addressed by nested key paths: the key `"name"` is a
//! top-level entry, the key `["person","address","city"]` descends through
//! intermediate objects (which `set` creates on demand).
//!
//! # Quick Start
//!
//! ```ignore
//! use pathdb::{Server, ServerConfig};
//!
//! let server = Server::bind(ServerConfig::default())?;
//! server.run()?; // serves until a client sends `exit`
//! ```
//!
//! # Architecture
//!
//! The crates layer bottom-up: `pathdb-core` holds the document tree and
//! path types, `pathdb-store` adds the backing file and the reader-writer
//! lock that makes each request's load→operate→persist sequence atomic,
//! `pathdb-protocol` defines the framed wire format, and `pathdb-server`
//! ties them together behind a bounded worker pool.

pub use pathdb_core::{Document, Error, KeyPath, Result};
pub use pathdb_protocol as protocol;
pub use pathdb_server::{Dispatcher, Server, ServerConfig, ShutdownHandle};
pub use pathdb_store::{DocumentFile, Store};
