// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured tool results.

use serde::Serialize;
use serde_json::Value;

/// Whether the operation happened, will happen, or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Queued,
    Error,
}

/// Result of one named operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReply {
    pub status: ReplyStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolReply {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        ToolReply {
            status: ReplyStatus::Ok,
            message: message.into(),
            error: None,
            data: Some(data),
        }
    }

    pub fn queued(message: impl Into<String>, error: impl Into<String>) -> Self {
        ToolReply {
            status: ReplyStatus::Queued,
            message: message.into(),
            error: Some(error.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        ToolReply {
            status: ReplyStatus::Error,
            message: message.into(),
            error: Some(error.into()),
            data: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ReplyStatus::Error
    }

    /// Pretty JSON, as embedded in a tool-call result.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
