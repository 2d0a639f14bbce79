//! The pathdb connection server
//!
//! Wires the store to the socket protocol:
//! - [`Dispatcher`]: maps a decoded request to a store operation and builds
//!   the response.
//! - [`WorkerPool`]: a bounded pool of blocking worker threads that handle
//!   accepted connections to completion.
//! - [`Server`]: the accept loop, stopped by a cooperative shutdown signal
//!   rather than a hard process exit.
//!
//! One connection carries exactly one request/response exchange.

pub mod dispatch;
pub mod pool;
pub mod server;

pub use dispatch::{Dispatcher, Outcome};
pub use pool::{PoolFullError, WorkerPool};
pub use server::{Server, ServerConfig, ShutdownHandle};
