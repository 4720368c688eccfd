// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::ledger::Ledger;
use crate::sync::transport_tests::MockTransport;
use crate::sync::SyncClient;
use crate::tools::RemoteTools;
use tempfile::{tempdir, TempDir};

fn remote_server(transport: MockTransport) -> (TempDir, ToolServer<MockTransport>) {
    let dir = tempdir().unwrap();
    let client = SyncClient::with_transport(transport, &dir.path().join("pending.jsonl"));
    let backend = Backend::Remote(RemoteTools::new(client, "me"));
    (dir, ToolServer::new(backend))
}

fn local_server() -> (TempDir, ToolServer<MockTransport>) {
    let dir = tempdir().unwrap();
    let ledger = Ledger::open(&Paths::new(dir.path())).with_template(0);
    (dir, ToolServer::new(Backend::Local(ledger)))
}

async fn request(server: &ToolServer<MockTransport>, line: &str) -> Value {
    let reply = server.handle_line(line).await.unwrap();
    serde_json::from_str(&reply).unwrap()
}

fn tool_reply(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn initialize_announces_tools_capability() {
    let (_dir, server) = local_server();

    let response = request(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
    )
    .await;

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(response["result"]["serverInfo"]["name"], "bracker");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn initialize_defaults_protocol_version() {
    let (_dir, server) = local_server();

    let response = request(&server, r#"{"jsonrpc":"2.0","id":"a","method":"initialize"}"#).await;

    assert_eq!(response["id"], "a");
    assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
}

#[tokio::test]
async fn notifications_get_no_reply() {
    let (_dir, server) = local_server();

    let reply = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn ping() {
    let (_dir, server) = local_server();
    let response = request(&server, r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#).await;
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn tools_list_names_all_four() {
    let (_dir, server) = local_server();

    let response = request(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;

    let names: Vec<_> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["log_build", "log_post", "get_stats", "suggest_tweet"]);
    assert!(response["result"]["tools"][0]["inputSchema"].is_object());
}

#[tokio::test]
async fn unknown_method() {
    let (_dir, server) = local_server();
    let response = request(&server, r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#).await;
    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn unparsable_line_is_parse_error_with_null_id() {
    let (_dir, server) = local_server();
    let response = request(&server, "{not json").await;
    assert_eq!(response["error"]["code"], -32700);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn request_without_method_is_invalid() {
    let (_dir, server) = local_server();
    let response = request(&server, r#"{"jsonrpc":"2.0","id":4}"#).await;
    assert_eq!(response["error"]["code"], -32600);
    assert_eq!(response["id"], 4);
}

#[tokio::test]
async fn unknown_tool_is_invalid_params() {
    let (_dir, server) = local_server();
    let response = request(
        &server,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"log_deploy"}}"#,
    )
    .await;
    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("log_deploy"));
}

#[tokio::test]
async fn tool_call_local_build() {
    let (_dir, server) = local_server();

    let response = request(
        &server,
        r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"log_build","arguments":{"repo":"bracker","diff_summary":"100 changes","commit_message":"feat","tokens_used":500}}}"#,
    )
    .await;

    assert_eq!(response["result"]["isError"], false);
    let reply = tool_reply(&response);
    assert_eq!(reply["status"], "ok");
    assert_eq!(reply["data"]["xpEarned"], 15);
}

#[tokio::test]
async fn tool_call_validation_error_sets_is_error() {
    let (_dir, server) = local_server();

    let response = request(
        &server,
        r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"log_post","arguments":{}}}"#,
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
    let reply = tool_reply(&response);
    assert_eq!(reply["status"], "error");
    assert_eq!(reply["error"], "url is required");
}

#[tokio::test]
async fn tool_call_offline_write_is_queued_not_error() {
    let (dir, server) = remote_server(MockTransport::offline());

    let response = request(
        &server,
        r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"log_post","arguments":{"url":"https://x.com/1"}}}"#,
    )
    .await;

    assert_eq!(response["result"]["isError"], false);
    assert_eq!(tool_reply(&response)["status"], "queued");
    assert!(dir.path().join("pending.jsonl").exists());
}

#[tokio::test]
async fn serve_answers_requests_in_order_and_skips_notifications() {
    let (_dir, server) = local_server();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );
    let mut output = Vec::new();

    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
}

#[tokio::test]
async fn serve_drains_backlog_before_returning() {
    let transport = MockTransport::new();
    let (dir, server) = remote_server(transport);
    let queue = crate::sync::DeliveryQueue::new(&dir.path().join("pending.jsonl"));
    queue
        .enqueue(&crate::sync::test_helpers::make_test_entry(1))
        .unwrap();

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"log_post","arguments":{"url":"https://x.com/1"}}}"#,
        "\n",
    );
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    assert!(queue.is_empty().unwrap());
}
