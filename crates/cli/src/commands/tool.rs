// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot tool commands: `build`, `post`, `stats` and `suggest`.
//!
//! Each command runs exactly the code path a tool call takes, then waits
//! for any background drain before exiting.

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::{Error, Result};
use crate::logging::setup_logging;
use crate::tools::{Backend, ReplyStatus, ToolName, ToolReply};

use super::{print_json, runtime};

/// Run `tool` with `args` against the configured backend.
pub fn run(paths: &Paths, tool: ToolName, args: Value, output: OutputFormat) -> Result<()> {
    let config = Config::load(&paths.config())?;
    setup_logging(&paths.log());

    let reply = runtime()?.block_on(async {
        let backend = Backend::from_config(&config, paths)?;
        let reply = backend.call(tool, &args).await?;
        backend.settle().await;
        Ok::<ToolReply, Error>(reply)
    })?;

    match output {
        OutputFormat::Json => print_json(&reply)?,
        OutputFormat::Text => {
            if !reply.is_error() {
                print!("{}", render_text(&reply));
            }
        }
    }

    if reply.is_error() {
        return Err(Error::Remote {
            message: reply.message,
            reason: reply.error.unwrap_or_default(),
        });
    }
    Ok(())
}

/// Human-readable rendering of a successful or queued reply.
pub fn render_text(reply: &ToolReply) -> String {
    let mut out = String::new();
    match reply.status {
        ReplyStatus::Ok => {
            out.push_str(&reply.message);
            out.push('\n');
            if let Some(data) = &reply.data {
                if let Some(draft) = data.get("tweetDraft").and_then(Value::as_str) {
                    if draft != reply.message {
                        out.push_str(&format!("\nDraft:\n  {draft}\n"));
                    }
                } else if !data.is_null() {
                    out.push_str(&serde_json::to_string_pretty(data).unwrap_or_default());
                    out.push('\n');
                }
            }
        }
        ReplyStatus::Queued | ReplyStatus::Error => {
            out.push_str(&reply.message);
            out.push('\n');
            if let Some(error) = &reply.error {
                out.push_str(&format!("  reason: {error}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
