//! End-to-end protocol scenarios over a real socket
//!
//! Each test starts a server on an ephemeral port, talks to it the way a
//! real client would (one framed exchange per connection), and checks the
//! exact wire-level responses.

mod common;

use common::{exchange, exchange_raw, TestServer};
use pathdb::protocol::{Request, Response};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn set_get_delete_lifecycle() {
    let dir = tempdir().unwrap();
    let server = TestServer::start(&dir.path().join("db.json"));

    // empty store: get misses
    let reply = exchange(server.addr, &Request::get("x"));
    assert_eq!(reply, Response::error("No such key"));

    // set then get returns the value
    let reply = exchange(server.addr, &Request::set("x", r#""hello""#));
    assert_eq!(reply, Response::ok());
    let reply = exchange(server.addr, &Request::get("x"));
    assert_eq!(reply, Response::ok_with_value(json!("hello")));

    // delete removes it
    let reply = exchange(server.addr, &Request::delete("x"));
    assert_eq!(reply, Response::ok());
    let reply = exchange(server.addr, &Request::get("x"));
    assert_eq!(reply, Response::error("No such key"));

    server.stop();
}

#[test]
fn nested_paths_over_the_wire() {
    let dir = tempdir().unwrap();
    let server = TestServer::start(&dir.path().join("db.json"));

    let reply = exchange(
        server.addr,
        &Request::set(r#"["person","address","city"]"#, r#""Berlin""#),
    );
    assert_eq!(reply, Response::ok());

    // intermediate objects were created
    let reply = exchange(server.addr, &Request::get(r#"["person","address"]"#));
    assert_eq!(reply, Response::ok_with_value(json!({"city": "Berlin"})));

    // a whole subtree can be read at its top-level key
    let reply = exchange(server.addr, &Request::get("person"));
    assert_eq!(
        reply,
        Response::ok_with_value(json!({"address": {"city": "Berlin"}}))
    );

    // deleting a leaf keeps its siblings
    let reply = exchange(
        server.addr,
        &Request::set(r#"["person","name"]"#, r#""Alice""#),
    );
    assert_eq!(reply, Response::ok());
    let reply = exchange(server.addr, &Request::delete(r#"["person","name"]"#));
    assert_eq!(reply, Response::ok());
    let reply = exchange(server.addr, &Request::get("person"));
    assert_eq!(
        reply,
        Response::ok_with_value(json!({"address": {"city": "Berlin"}}))
    );

    server.stop();
}

#[test]
fn structured_values_round_trip() {
    let dir = tempdir().unwrap();
    let server = TestServer::start(&dir.path().join("db.json"));

    for value in [
        json!(null),
        json!(true),
        json!(42),
        json!([1, "two", null]),
        json!({"deep": {"list": [1, 2]}}),
    ] {
        let encoded = value.to_string();
        let reply = exchange(server.addr, &Request::set("slot", &encoded));
        assert_eq!(reply, Response::ok(), "set {}", encoded);
        let reply = exchange(server.addr, &Request::get("slot"));
        assert!(reply.is_ok(), "get after set {}", encoded);
        // A stored null comes back as `"value": null`, which decodes to an
        // absent field; fold both to the same node before comparing.
        assert_eq!(reply.value.unwrap_or(json!(null)), value);
    }

    server.stop();
}

#[test]
fn error_responses() {
    let dir = tempdir().unwrap();
    let server = TestServer::start(&dir.path().join("db.json"));

    // unknown command type
    let reply: Response = serde_json::from_str(&exchange_raw(
        server.addr,
        r#"{"type":"touch","key":"x"}"#,
    ))
    .unwrap();
    assert_eq!(reply, Response::error("Invalid command"));

    // payload that is not a request object
    let reply: Response =
        serde_json::from_str(&exchange_raw(server.addr, "this is not json")).unwrap();
    assert_eq!(reply, Response::error("Malformed request"));

    // set with a value that is not JSON
    let reply = exchange(server.addr, &Request::set("x", "{broken"));
    assert_eq!(reply, Response::error("Invalid value"));

    // empty-array key
    let reply = exchange(server.addr, &Request::get("[]"));
    assert_eq!(reply, Response::error("Invalid key"));

    // delete on an absent key, twice, changes nothing
    let reply = exchange(server.addr, &Request::delete("ghost"));
    assert_eq!(reply, Response::error("No such key"));
    let reply = exchange(server.addr, &Request::delete("ghost"));
    assert_eq!(reply, Response::error("No such key"));

    server.stop();
}

#[test]
fn exit_shuts_the_server_down_after_replying() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("db.json");
    let server = TestServer::start(&db_path);
    let addr = server.addr;

    let reply = exchange(addr, &Request::set("kept", "1"));
    assert_eq!(reply, Response::ok());

    // exit gets an OK before the server stops
    let reply = exchange(addr, &Request::exit());
    assert_eq!(reply, Response::ok());
    server.stop();

    // a restarted server sees the persisted document
    let server = TestServer::start(&db_path);
    let reply = exchange(server.addr, &Request::get("kept"));
    assert_eq!(reply, Response::ok_with_value(json!(1)));
    server.stop();
}
