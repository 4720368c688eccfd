// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable delivery queue for writes the remote didn't accept.
//!
//! Uses JSONL format for durability - each entry is written as a single line
//! and fsynced immediately. Entries are replayed in order by a drain.
//!
//! Two lock files guard the queue:
//! - `<name>.lock` serializes appends, snapshots and rewrites.
//! - `<name>.drain.lock` is held for a whole drain, so at most one drain runs
//!   across all processes sharing the queue.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use bk_core::jsonl;

use super::transport::{Method, RemoteRequest};
use crate::lock::FileLock;

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSONL storage error.
    #[error("{0}")]
    Storage(#[from] bk_core::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// One deferred remote write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEntry {
    /// Idempotency key, reused on every retry of this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub method: Method,
    pub path: String,
    #[serde(default)]
    pub body: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl PendingEntry {
    /// Captures a request for later replay.
    pub fn from_request(request: &RemoteRequest, timestamp: DateTime<Utc>) -> Self {
        PendingEntry {
            id: request.idempotency_key.clone(),
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
            timestamp,
        }
    }

    /// Rebuilds the request this entry was captured from.
    pub fn to_request(&self) -> RemoteRequest {
        RemoteRequest {
            method: self.method,
            path: self.path.clone(),
            body: self.body.clone(),
            idempotency_key: self.id.clone(),
        }
    }
}

/// File-backed FIFO of [`PendingEntry`] lines.
#[derive(Debug, Clone)]
pub struct DeliveryQueue {
    path: PathBuf,
    lock_path: PathBuf,
    drain_lock_path: PathBuf,
}

impl DeliveryQueue {
    /// Opens the queue stored at `path`. Nothing is created until first use.
    pub fn new(path: &Path) -> Self {
        DeliveryQueue {
            path: path.to_path_buf(),
            lock_path: path.with_extension("lock"),
            drain_lock_path: path.with_extension("drain.lock"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an entry. Returns once the line is on disk.
    pub fn enqueue(&self, entry: &PendingEntry) -> QueueResult<()> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        jsonl::append(&self.path, entry)?;
        Ok(())
    }

    /// Number of stored lines, including unreadable ones.
    pub fn len(&self) -> QueueResult<usize> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        Ok(jsonl::read_lines(&self.path)?.len())
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Reads every entry that still parses, oldest first.
    pub fn peek_all(&self) -> QueueResult<Vec<PendingEntry>> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let entries = jsonl::read_lines(&self.path)?
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();
        Ok(entries)
    }

    /// Starts a drain over a snapshot of the current lines.
    ///
    /// Returns `Ok(None)` if another drain is already running.
    pub fn try_begin_drain(&self) -> QueueResult<Option<DrainSession<'_>>> {
        let Some(drain_guard) = FileLock::try_exclusive(&self.drain_lock_path)? else {
            return Ok(None);
        };
        let snapshot = {
            let _guard = FileLock::exclusive(&self.lock_path)?;
            jsonl::read_lines(&self.path)?
        };
        Ok(Some(DrainSession {
            queue: self,
            _drain_guard: drain_guard,
            snapshot,
        }))
    }
}

/// An exclusive drain over a snapshot of queued lines.
///
/// Lines appended after the snapshot are preserved by [`DrainSession::finish`].
#[derive(Debug)]
pub struct DrainSession<'a> {
    queue: &'a DeliveryQueue,
    _drain_guard: FileLock,
    snapshot: Vec<String>,
}

impl DrainSession<'_> {
    /// Snapshot lines in file order.
    pub fn lines(&self) -> &[String] {
        &self.snapshot
    }

    /// Rewrites the queue as `kept` followed by lines appended since the
    /// snapshot. The file is removed when nothing remains.
    ///
    /// Returns the number of lines left in the queue.
    pub fn finish(self, kept: Vec<String>) -> QueueResult<usize> {
        let _guard = FileLock::exclusive(&self.queue.lock_path)?;
        let current = jsonl::read_lines(&self.queue.path)?;

        let mut remaining = kept;
        if let Some(appended) = current.get(self.snapshot.len()..) {
            remaining.extend_from_slice(appended);
        }
        jsonl::write_lines_or_remove(&self.queue.path, &remaining)?;
        Ok(remaining.len())
    }
}
