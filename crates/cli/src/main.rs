//! pathdb client
//!
//! Sends a single request to a running server and prints the exchange:
//!
//! ```text
//! pathdb -t set -k '["person","name"]' -v '"Alice"'
//! pathdb -t get -k '["person","name"]'
//! pathdb -t exit
//! ```
//!
//! The value passed with `-v` must itself be JSON text (`'"Alice"'`, `'1'`,
//! `'{"a":1}'`); the server rejects anything else with `Invalid value`.

use clap::{Arg, Command};
use pathdb_protocol::{read_frame, write_frame, FrameError, Request, DEFAULT_ADDRESS};
use std::net::TcpStream;
use std::process;

fn build_cli() -> Command {
    Command::new("pathdb")
        .about("Send one request to a pathdb server")
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_name("TYPE")
                .required(true)
                .help("Command type (get, set, delete, exit)"),
        )
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .value_name("KEY")
                .help("Key, or key path as a JSON array of strings"),
        )
        .arg(
            Arg::new("value")
                .short('v')
                .long("value")
                .value_name("JSON")
                .help("JSON-encoded value to set (set only)"),
        )
        .arg(
            Arg::new("address")
                .long("address")
                .value_name("ADDR")
                .default_value(DEFAULT_ADDRESS)
                .help("Server address"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .default_value("23451")
                .help("Server port"),
        )
}

fn exchange(addr: (&str, u16), payload: &str) -> Result<String, FrameError> {
    let mut stream = TcpStream::connect(addr)?;
    write_frame(&mut stream, payload)?;
    read_frame(&mut stream)
}

fn main() {
    let matches = build_cli().get_matches();

    let request = Request {
        kind: matches
            .get_one::<String>("type")
            .cloned()
            .unwrap_or_default(),
        key: matches.get_one::<String>("key").cloned(),
        value: matches.get_one::<String>("value").cloned(),
    };
    let payload = match serde_json::to_string(&request) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("failed to encode request: {}", e);
            process::exit(1);
        }
    };

    let address = matches
        .get_one::<String>("address")
        .cloned()
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    let port = matches.get_one::<u16>("port").copied().unwrap_or(23451);

    println!("Sent: {}", payload);
    match exchange((address.as_str(), port), &payload) {
        Ok(reply) => println!("Received: {}", reply),
        Err(e) => {
            eprintln!("exchange failed: {}", e);
            process::exit(1);
        }
    }
}
