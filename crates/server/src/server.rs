//! Accept loop and connection handling
//!
//! The server accepts plain TCP connections and hands each one to the
//! worker pool. A connection carries exactly one exchange: read one framed
//! request, dispatch it, write one framed response, close.
//!
//! Shutdown is cooperative: the `exit` command (or any holder of a
//! [`ShutdownHandle`]) raises a flag and pokes the listener with a throwaway
//! connection to unblock `accept`. The accept loop then stops and the pool
//! drains in-flight work, so the final response is flushed before the
//! process exits. There is no hard `exit()` that could orphan a write.

use crate::dispatch::{Dispatcher, Outcome};
use crate::pool::WorkerPool;
use pathdb_core::Error;
use pathdb_protocol::{read_frame, write_frame, Request, Response, DEFAULT_ADDRESS, DEFAULT_PORT};
use pathdb_store::Store;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub address: String,
    /// Listen port (0 picks an ephemeral port)
    pub port: u16,
    /// Backing document file
    pub db_path: PathBuf,
    /// Worker thread count
    pub workers: usize,
    /// Pending-connection queue capacity
    pub queue_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from("data/db.json"),
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(4),
            queue_depth: 64,
        }
    }
}

/// Signal that stops the accept loop
///
/// Cloneable and shareable across threads; `trigger` is idempotent.
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Raise the shutdown flag and unblock the accept call
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
        // accept() blocks until a connection arrives, so poke the listener
        let mut addr = self.addr;
        if addr.ip().is_unspecified() {
            addr.set_ip(IpAddr::V4(Ipv4Addr::LOCALHOST));
        }
        let _ = TcpStream::connect(addr);
    }

    /// Whether shutdown has been requested
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// The connection server
pub struct Server {
    listener: TcpListener,
    store: Arc<Store>,
    shutdown: Arc<AtomicBool>,
    config: ServerConfig,
}

impl Server {
    /// Bind the listen socket and open the store
    pub fn bind(config: ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind((config.address.as_str(), config.port))?;
        let store = Arc::new(Store::new(&config.db_path));
        Ok(Server {
            listener,
            store,
            shutdown: Arc::new(AtomicBool::new(false)),
            config,
        })
    }

    /// The actual bound address (useful when the port was 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// A handle that can stop this server from any thread
    pub fn shutdown_handle(&self) -> io::Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr: self.listener.local_addr()?,
        })
    }

    /// Accept connections until shutdown is triggered, then drain and return
    pub fn run(self) -> io::Result<()> {
        let shutdown = self.shutdown_handle()?;
        let dispatcher = Dispatcher::new(Arc::clone(&self.store));
        let pool = WorkerPool::new(self.config.workers, self.config.queue_depth);

        info!(
            addr = %self.listener.local_addr()?,
            file = %self.config.db_path.display(),
            workers = self.config.workers,
            "server started"
        );

        for conn in self.listener.incoming() {
            if shutdown.is_triggered() {
                break;
            }
            let stream = match conn {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            let dispatcher = dispatcher.clone();
            let shutdown = shutdown.clone();
            let submitted =
                pool.submit(move || handle_connection(stream, &dispatcher, &shutdown));
            if submitted.is_err() {
                warn!("worker queue full, dropping connection");
            }
        }

        info!("shutting down, draining in-flight requests");
        pool.shutdown();
        Ok(())
    }
}

/// Serve one connection: one framed request in, one framed response out
fn handle_connection(mut stream: TcpStream, dispatcher: &Dispatcher, shutdown: &ShutdownHandle) {
    let text = match read_frame(&mut stream) {
        Ok(text) => text,
        Err(e) => {
            // Framing failure: nothing sensible to answer, drop the connection
            warn!(error = %e, "dropping connection with unreadable frame");
            return;
        }
    };
    debug!(request = %text, "received");

    let (response, outcome) = match serde_json::from_str::<Request>(&text) {
        Ok(request) => dispatcher.dispatch(&request),
        Err(_) => (
            Response::error(Error::MalformedRequest.to_string()),
            Outcome::Continue,
        ),
    };

    let encoded = serde_json::to_string(&response).unwrap_or_else(|_| {
        r#"{"response":"ERROR","reason":"Internal error"}"#.to_string()
    });
    match write_frame(&mut stream, &encoded) {
        Ok(()) => debug!(response = %encoded, "sent"),
        Err(e) => warn!(error = %e, "failed to send response"),
    }

    if outcome == Outcome::Shutdown {
        info!("shutdown requested by client");
        shutdown.trigger();
    }
}
