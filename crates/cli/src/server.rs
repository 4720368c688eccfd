// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool server speaking line-delimited JSON-RPC 2.0 over stdio.
//!
//! Requests are handled one at a time, in arrival order. Messages without an
//! `id` are notifications and never get a reply.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::{Config, Paths};
use crate::error::{Error, Result};
use crate::logging::setup_logging;
use crate::sync::{HttpTransport, Transport};
use crate::tools::{definitions, Backend, ToolName, ToolReply};

/// Protocol revision announced when the client doesn't name one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "bracker";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl RpcResponse {
    fn result(id: Value, result: Value) -> Self {
        RpcResponse {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        RpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Serves the named operations to a tool-calling client.
pub struct ToolServer<T: Transport = HttpTransport> {
    backend: Backend<T>,
}

impl<T: Transport> ToolServer<T> {
    pub fn new(backend: Backend<T>) -> Self {
        ToolServer { backend }
    }

    pub fn backend(&self) -> &Backend<T> {
        &self.backend
    }

    /// Handles one input line, returning the reply line if any.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => Some(RpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("parse error: {e}"),
            )),
            Ok(value) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<RpcRequest>(value) {
                    Ok(request) => self.handle_request(request).await,
                    Err(e) => Some(RpcResponse::error(
                        id,
                        INVALID_REQUEST,
                        format!("invalid request: {e}"),
                    )),
                }
            }
        };
        let response = response?;
        match serde_json::to_string(&response) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(error = %e, "failed to encode response");
                None
            }
        }
    }

    async fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };
        debug!(method = %request.method, "request");

        let response = match request.method.as_str() {
            "initialize" => RpcResponse::result(id, initialize_result(&request.params)),
            "ping" => RpcResponse::result(id, json!({})),
            "tools/list" => RpcResponse::result(id, json!({ "tools": definitions() })),
            "tools/call" => self.call_tool(id, &request.params).await,
            other => RpcResponse::error(id, METHOD_NOT_FOUND, format!("method not found: {other}")),
        };
        Some(response)
    }

    async fn call_tool(&self, id: Value, params: &Value) -> RpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return RpcResponse::error(id, INVALID_PARAMS, "missing tool name");
        };
        let tool = match name.parse::<ToolName>() {
            Ok(tool) => tool,
            Err(e) => return RpcResponse::error(id, INVALID_PARAMS, e.to_string()),
        };
        let args = params.get("arguments").cloned().unwrap_or(Value::Null);

        let reply = match self.backend.call(tool, &args).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(tool = %tool, error = %e, "tool call failed");
                ToolReply::error(format!("{tool} failed"), e.to_string())
            }
        };
        info!(tool = %tool, status = ?reply.status, "tool call");

        RpcResponse::result(
            id,
            json!({
                "content": [{ "type": "text", "text": reply.to_pretty_json() }],
                "isError": reply.is_error(),
            }),
        )
    }

    /// Reads requests until EOF, writing one reply line per request.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_line(&line).await {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        self.backend.settle().await;
        Ok(())
    }
}

fn initialize_result(params: &Value) -> Value {
    let protocol = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": protocol,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// Runs the tool server on stdin/stdout until the client hangs up.
pub fn run(paths: &Paths) -> Result<()> {
    let config = Config::load(&paths.config())?;
    setup_logging(&paths.log());

    crate::commands::runtime()?.block_on(async {
        let server = ToolServer::new(Backend::from_config(&config, paths)?);
        info!(mode = ?config.mode, home = %paths.home().display(), "tool server started");

        server.backend().spawn_drain();
        server
            .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;

        info!("tool server stopped");
        Ok::<(), Error>(())
    })
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
