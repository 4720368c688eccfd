// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL (JSON Lines) file utilities.
//!
//! Durable append-only storage used by the delivery queue and the local
//! event ledger. Every write is fsynced before returning.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Appends a record as one line, creating the file and its directory if
/// needed.
pub fn append<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let json = serde_json::to_string(record)?;
    append_line(path, &json)
}

/// Appends a pre-serialized line.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    file.sync_all()?;
    Ok(())
}

/// Reads every non-blank line verbatim.
///
/// Returns an empty vec if the file doesn't exist.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Replaces the file content with `lines`.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    ensure_parent(path)?;
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    file.sync_all()?;
    Ok(())
}

/// Like [`write_lines`], but deletes the file when there is nothing left.
pub fn write_lines_or_remove(path: &Path, lines: &[String]) -> Result<()> {
    if !lines.is_empty() {
        return write_lines(path, lines);
    }
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
