// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema command implementation.
//!
//! Outputs the JSON Schema of a tool's arguments, or the whole tool listing
//! as served by `tools/list`.

use serde_json::Value;

use crate::error::Result;
use crate::tools::{definitions, ToolName};

use super::print_json;

/// Run the schema command.
pub fn run(tool: Option<ToolName>) -> Result<()> {
    print_json(&schema_output(tool))
}

pub fn schema_output(tool: Option<ToolName>) -> Value {
    match tool {
        Some(tool) => tool.input_schema(),
        None => serde_json::json!({ "tools": definitions() }),
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
