//! pathdb server binary
//!
//! Binds the listen socket, then serves until a client sends `exit`.
//! Flags override the listen address, port, and backing file; defaults
//! match the wire protocol contract (`127.0.0.1:23451`, `data/db.json`).

use clap::{Arg, Command};
use pathdb_protocol::{DEFAULT_ADDRESS, DEFAULT_PORT};
use pathdb_server::{Server, ServerConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("pathdb-server")
        .about("Path-addressed JSON document server")
        .arg(
            Arg::new("address")
                .long("address")
                .value_name("ADDR")
                .default_value(DEFAULT_ADDRESS)
                .help("Listen address"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .default_value("23451")
                .help("Listen port"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("PATH")
                .default_value("data/db.json")
                .help("Backing document file"),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = build_cli().get_matches();
    let config = ServerConfig {
        address: matches
            .get_one::<String>("address")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        port: matches.get_one::<u16>("port").copied().unwrap_or(DEFAULT_PORT),
        db_path: matches
            .get_one::<String>("file")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/db.json")),
        ..ServerConfig::default()
    };

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("failed to bind: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = server.run() {
        eprintln!("server failed: {}", e);
        process::exit(1);
    }
}
