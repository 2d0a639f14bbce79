//! Error types for pathdb
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! The `Display` strings of the request-level variants are exactly the
//! `reason` strings clients see in an `ERROR` response, so they are part of
//! the wire contract and must not be reworded casually.

use std::io;
use thiserror::Error;

/// Result type alias for pathdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the pathdb server
#[derive(Debug, Error)]
pub enum Error {
    /// No value exists at the requested path
    #[error("No such key")]
    NotFound,

    /// The `value` field of a set request was missing or not parseable JSON
    #[error("Invalid value")]
    InvalidValue,

    /// The request carried an unrecognized command type
    #[error("Invalid command")]
    InvalidCommand,

    /// The key resolved to an empty path
    #[error("Invalid key")]
    InvalidKey,

    /// The request payload framed correctly but did not decode
    #[error("Malformed request")]
    MalformedRequest,

    /// I/O error (socket or backing file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is a client-side fault that maps to an `ERROR`
    /// response, as opposed to a server-side I/O fault.
    pub fn is_request_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
