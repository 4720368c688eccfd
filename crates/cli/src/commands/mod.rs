// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod level;
pub mod queue;
pub mod schema;
pub mod tool;

use tokio::runtime::Runtime;

use crate::error::{Error, Result};

/// Runtime for one command. Work is strictly sequential, so a single
/// thread is enough.
pub(crate) fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))
}

/// Pretty-prints a serializable value.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
