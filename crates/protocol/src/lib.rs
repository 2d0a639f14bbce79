//! Wire protocol for pathdb
//!
//! Defines the request/response payloads and the framing both sides speak:
//! - Request: `{"type": "get"|"set"|"delete"|"exit", "key": ..., "value": ...}`
//! - Success response: `{"response": "OK"}` (plus `value` for get)
//! - Error response: `{"response": "ERROR", "reason": "..."}`
//!
//! Framing is one length-prefixed UTF-8 message per direction: an unsigned
//! 16-bit big-endian byte count followed by that many bytes. One exchange
//! per connection; no sessions, no pipelining.

pub mod framing;
pub mod message;

pub use framing::{read_frame, write_frame, FrameError, MAX_FRAME_LEN};
pub use message::{Command, Request, Response, Status};

/// Default listen address for the server
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";

/// Default listen port for the server
pub const DEFAULT_PORT: u16 = 23451;
