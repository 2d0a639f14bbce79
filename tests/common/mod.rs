//! Shared helpers for socket-level integration tests
//!
//! Import via `mod common;` from any test target.

#![allow(dead_code)]

use pathdb::protocol::{read_frame, write_frame, Request, Response};
use pathdb::{Server, ServerConfig, ShutdownHandle};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::thread::JoinHandle;

/// A server running on an ephemeral port in a background thread
pub struct TestServer {
    pub addr: SocketAddr,
    handle: ShutdownHandle,
    runner: Option<JoinHandle<std::io::Result<()>>>,
}

impl TestServer {
    /// Start a server backed by the given document file
    pub fn start(db_path: &Path) -> Self {
        let config = ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
            db_path: db_path.to_path_buf(),
            workers: 4,
            queue_depth: 64,
        };
        let server = Server::bind(config).expect("bind test server");
        let addr = server.local_addr().expect("local addr");
        let handle = server.shutdown_handle().expect("shutdown handle");
        let runner = std::thread::spawn(move || server.run());
        TestServer {
            addr,
            handle,
            runner: Some(runner),
        }
    }

    /// Stop the server and wait for the accept loop to exit
    pub fn stop(mut self) {
        self.handle.trigger();
        if let Some(runner) = self.runner.take() {
            runner.join().expect("server thread").expect("server run");
        }
    }
}

/// One full request/response exchange on a fresh connection
pub fn exchange(addr: SocketAddr, request: &Request) -> Response {
    let payload = serde_json::to_string(request).expect("encode request");
    let reply = exchange_raw(addr, &payload);
    serde_json::from_str(&reply).expect("decode response")
}

/// Send pre-encoded text and return the raw response text
pub fn exchange_raw(addr: SocketAddr, payload: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    write_frame(&mut stream, payload).expect("send frame");
    read_frame(&mut stream).expect("read frame")
}
