//! Request dispatch
//!
//! Maps each decoded request to a store operation and builds the wire
//! response. Every client-side fault becomes an `ERROR` response with the
//! reason string from the error taxonomy; only the shutdown command affects
//! anything beyond the current request.

use pathdb_core::{Error, KeyPath, Result};
use pathdb_protocol::{Command, Request, Response};
use pathdb_store::Store;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// What the server should do after sending the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep serving connections
    Continue,
    /// Stop accepting and drain in-flight work
    Shutdown,
}

/// Stateless per-request dispatcher over a shared store
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
}

impl Dispatcher {
    /// Create a dispatcher over the given store
    pub fn new(store: Arc<Store>) -> Self {
        Dispatcher { store }
    }

    /// Handle one request, producing the response and the follow-up action
    pub fn dispatch(&self, request: &Request) -> (Response, Outcome) {
        match request.command() {
            Command::Get => (self.respond(self.try_get(request)), Outcome::Continue),
            Command::Set => (
                self.respond(self.try_set(request).map(|_| None)),
                Outcome::Continue,
            ),
            Command::Delete => (
                self.respond(self.try_delete(request).map(|_| None)),
                Outcome::Continue,
            ),
            Command::Shutdown => (Response::ok(), Outcome::Shutdown),
            Command::Invalid => (
                Response::error(Error::InvalidCommand.to_string()),
                Outcome::Continue,
            ),
        }
    }

    fn try_get(&self, request: &Request) -> Result<Option<Value>> {
        let path = resolve_key(request)?;
        let value = self.store.get(&path)?.ok_or(Error::NotFound)?;
        Ok(Some(value))
    }

    fn try_set(&self, request: &Request) -> Result<()> {
        let path = resolve_key(request)?;
        let raw = request.value.as_deref().ok_or(Error::InvalidValue)?;
        let value: Value = serde_json::from_str(raw).map_err(|_| Error::InvalidValue)?;
        self.store.set(&path, value)
    }

    fn try_delete(&self, request: &Request) -> Result<()> {
        let path = resolve_key(request)?;
        if !self.store.delete(&path)? {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    /// Convert an operation result into a wire response
    ///
    /// Request-level errors carry their taxonomy reason verbatim. An I/O
    /// fault on the backing file is an operator problem, not a client one:
    /// it is logged server-side and reported as a generic internal error so
    /// the write is never silently lost.
    fn respond(&self, result: Result<Option<Value>>) -> Response {
        match result {
            Ok(Some(value)) => Response::ok_with_value(value),
            Ok(None) => Response::ok(),
            Err(e) if e.is_request_error() => Response::error(e.to_string()),
            Err(e) => {
                error!(error = %e, "store operation failed");
                Response::error("Internal error")
            }
        }
    }
}

fn resolve_key(request: &Request) -> Result<KeyPath> {
    KeyPath::resolve(request.key.as_deref().unwrap_or(""))
}
