// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bracker serve`: JSON-RPC over stdin/stdout.

#![allow(clippy::unwrap_used)]

use super::common::*;
use serde_json::{json, Value};

fn serve(temp: &TempDir, requests: &[Value]) -> Vec<Value> {
    let mut input = String::new();
    for request in requests {
        input.push_str(&request.to_string());
        input.push('\n');
    }

    let output = bracker(temp.path())
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn handshake_and_listing() {
    let temp = local_home();

    let replies = serve(
        &temp,
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        ],
    );

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["serverInfo"]["name"], "bracker");
    assert_eq!(replies[1]["id"], 2);
    assert_eq!(replies[1]["result"]["tools"].as_array().unwrap().len(), 4);
}

#[test]
fn tool_call_in_local_mode() {
    let temp = local_home();

    let replies = serve(
        &temp,
        &[json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": "log_post", "arguments": { "url": "https://x.com/me/status/9" } },
        })],
    );

    assert_eq!(replies[0]["result"]["isError"], false);
    let payload = tool_payload(&replies[0]);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["data"]["xpEarned"], 50);
}

#[test]
fn tool_call_offline_is_queued() {
    let temp = offline_home();

    let replies = serve(
        &temp,
        &[json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": "log_build",
                "arguments": {
                    "repo": "api",
                    "diff_summary": "1 file changed",
                    "commit_message": "fix",
                },
            },
        })],
    );

    assert_eq!(replies[0]["result"]["isError"], false);
    assert_eq!(tool_payload(&replies[0])["status"], "queued");
    assert_eq!(pending_lines(temp.path()).len(), 1);
}

#[test]
fn missing_required_argument_is_tool_error() {
    let temp = local_home();

    let replies = serve(
        &temp,
        &[json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "log_build", "arguments": { "repo": "api" } },
        })],
    );

    assert_eq!(replies[0]["result"]["isError"], true);
    let payload = tool_payload(&replies[0]);
    assert_eq!(payload["status"], "error");
    assert!(payload["error"].as_str().unwrap().contains("is required"));
}

#[test]
fn protocol_errors() {
    let temp = local_home();

    let mut input = String::from("not json\n");
    input.push_str(&json!({ "jsonrpc": "2.0", "id": 4, "method": "resources/list" }).to_string());
    input.push('\n');
    input.push_str(
        &json!({ "jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": { "name": "nope" } })
            .to_string(),
    );
    input.push('\n');

    let output = bracker(temp.path())
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();
    let replies: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1]["error"]["code"], -32601);
    assert_eq!(replies[2]["error"]["code"], -32602);
}

#[test]
fn serve_without_config_fails() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .arg("serve")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}
