//! Request and response payloads
//!
//! Both payloads are JSON objects. The request's `key` is a raw string or a
//! JSON-array-of-strings path; its `value` (set only) is itself a
//! JSON-encoded value carried as a string. The response's `value` appears
//! only on a successful get, `reason` only on an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded request command kind
///
/// `Invalid` covers every `type` string the server does not recognize; the
/// dispatcher answers it with an error response without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read the value at a path
    Get,
    /// Write a value at a path
    Set,
    /// Remove the value at a path
    Delete,
    /// Stop the server (wire type `exit`)
    Shutdown,
    /// Unrecognized command type
    Invalid,
}

/// Wire request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Command type: `get`, `set`, `delete`, or `exit`
    #[serde(rename = "type")]
    pub kind: String,

    /// Key or key path as a JSON-array-of-strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// JSON-encoded value to set (set only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Request {
    /// Build a get request
    pub fn get(key: impl Into<String>) -> Self {
        Request {
            kind: "get".to_string(),
            key: Some(key.into()),
            value: None,
        }
    }

    /// Build a set request; `value` must be JSON-encoded text
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Request {
            kind: "set".to_string(),
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    /// Build a delete request
    pub fn delete(key: impl Into<String>) -> Self {
        Request {
            kind: "delete".to_string(),
            key: Some(key.into()),
            value: None,
        }
    }

    /// Build a shutdown request
    pub fn exit() -> Self {
        Request {
            kind: "exit".to_string(),
            key: None,
            value: None,
        }
    }

    /// The command kind this request names
    pub fn command(&self) -> Command {
        match self.kind.as_str() {
            "get" => Command::Get,
            "set" => Command::Set,
            "delete" => Command::Delete,
            "exit" => Command::Shutdown,
            _ => Command::Invalid,
        }
    }
}

/// Response status marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Request succeeded
    #[serde(rename = "OK")]
    Ok,
    /// Request failed; `reason` explains why
    #[serde(rename = "ERROR")]
    Error,
}

/// Wire response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// `OK` or `ERROR`
    #[serde(rename = "response")]
    pub status: Status,

    /// Retrieved value (successful get only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Failure reason (errors only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Response {
    /// A bare success response
    pub fn ok() -> Self {
        Response {
            status: Status::Ok,
            value: None,
            reason: None,
        }
    }

    /// A success response carrying a retrieved value
    pub fn ok_with_value(value: Value) -> Self {
        Response {
            status: Status::Ok,
            value: Some(value),
            reason: None,
        }
    }

    /// An error response with a reason
    pub fn error(reason: impl Into<String>) -> Self {
        Response {
            status: Status::Error,
            value: None,
            reason: Some(reason.into()),
        }
    }

    /// Whether the status is `OK`
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
