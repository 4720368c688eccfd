// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{QueueError, SyncError};

/// All possible errors that can occur in the bkrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config not found at {path}\n  hint: create it with:\n    mkdir -p {dir}\n    echo '{{\"apiUrl\":\"https://bracker.dev/api\",\"apiKey\":\"YOUR_KEY\",\"username\":\"YOUR_USERNAME\"}}' > {path}")]
    ConfigNotFound { path: String, dir: String },

    #[error("invalid config at {path}: {reason}\n  hint: config.json needs apiUrl and apiKey, or \"mode\": \"local\"")]
    ConfigInvalid { path: String, reason: String },

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    #[error("unknown tool: '{0}'\n  hint: valid tools are: log_build, log_post, get_stats, suggest_tweet")]
    UnknownTool(String),

    #[error("{message}: {reason}")]
    Remote { message: String, reason: String },

    #[error("failed to start async runtime: {0}")]
    Runtime(String),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Core(#[from] bk_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bkrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
