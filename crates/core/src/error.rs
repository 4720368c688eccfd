// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bk-core operations.

use thiserror::Error;

/// All possible errors that can occur in bk-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid draft style: '{0}'\n  hint: valid styles are: raw, polished, educational")]
    InvalidStyle(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
