// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery queue commands.

use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::{Error, Result};
use crate::logging::setup_logging;
use crate::sync::{DeliveryQueue, DrainReport, PendingEntry, SyncClient};

use super::{print_json, runtime};

/// Show how many writes are waiting. Needs no config.
pub fn status(paths: &Paths, output: OutputFormat) -> Result<()> {
    let queue = DeliveryQueue::new(&paths.pending());
    let pending = queue.len()?;
    let entries = queue.peek_all()?;

    match output {
        OutputFormat::Json => print_json(&json!({
            "pending": pending,
            "unreadable": pending.saturating_sub(entries.len()),
            "entries": entries,
        }))?,
        OutputFormat::Text => print!("{}", render_status(pending, &entries)),
    }
    Ok(())
}

/// Drain the queue in the foreground.
pub fn flush(paths: &Paths, output: OutputFormat) -> Result<()> {
    let config_path = paths.config();
    let config = Config::load(&config_path)?;
    let Some(remote) = config.remote() else {
        return Err(Error::ConfigInvalid {
            path: config_path.display().to_string(),
            reason: "queue flush needs a remote config (mode is local)".to_string(),
        });
    };
    setup_logging(&paths.log());

    let client = SyncClient::new(remote.api_url, remote.api_key, &paths.pending())?;
    let report = runtime()?.block_on(client.drain())?;

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", render_report(&report)),
    }
    Ok(())
}

pub fn render_status(pending: usize, entries: &[PendingEntry]) -> String {
    if pending == 0 {
        return "No pending writes.\n".to_string();
    }
    let mut out = format!("Pending writes: {pending}\n");
    for entry in entries {
        out.push_str(&format!(
            "  {} {} {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.method.as_str(),
            entry.path
        ));
    }
    let unreadable = pending.saturating_sub(entries.len());
    if unreadable > 0 {
        out.push_str(&format!("  ({unreadable} unreadable, kept as-is)\n"));
    }
    out
}

pub fn render_report(report: &DrainReport) -> String {
    if report.skipped {
        return "Another flush is already running; nothing sent.".to_string();
    }
    if report.attempted == 0 && report.unreadable == 0 {
        return "No pending writes.".to_string();
    }
    let mut out = format!(
        "Delivered {} of {} pending writes, {} remaining.",
        report.delivered, report.attempted, report.remaining
    );
    if report.unreadable > 0 {
        out.push_str(&format!(" {} unreadable, kept as-is.", report.unreadable));
    }
    out
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
