// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync client for the remote scoring API.
//!
//! Provides a high-level interface for:
//! - Sending reads and writes
//! - Queueing writes the remote didn't accept
//! - Draining the queue in the background after a success

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::queue::{DeliveryQueue, PendingEntry, QueueError};
use super::transport::{HttpTransport, RemoteRequest, Transport, TransportError};

/// Error type for sync client operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Queue error.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Result type for sync client operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// What happened to one remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// The remote accepted the request and answered with this body.
    Delivered(Value),
    /// The write was persisted for a later drain.
    Queued { error: String },
    /// The operation failed and nothing was persisted.
    Failed { error: String },
}

/// Summary of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Another drain held the queue, nothing was attempted.
    pub skipped: bool,
    /// Entries sent to the remote.
    pub attempted: usize,
    pub delivered: usize,
    /// Lines that could not be parsed and were kept without sending.
    pub unreadable: usize,
    /// Lines left in the queue afterwards.
    pub remaining: usize,
}

struct Inner<T> {
    transport: T,
    queue: DeliveryQueue,
    background: Mutex<Vec<JoinHandle<()>>>,
}

/// Sync client for remote operations.
///
/// Cheap to clone; clones share the transport, queue and background drains.
pub struct SyncClient<T: Transport = HttpTransport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for SyncClient<T> {
    fn clone(&self) -> Self {
        SyncClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SyncClient<HttpTransport> {
    /// Create a sync client talking HTTPS to `api_url`.
    pub fn new(api_url: &str, api_key: &str, queue_path: &Path) -> SyncResult<Self> {
        let transport = HttpTransport::new(api_url, api_key)?;
        Ok(Self::with_transport(transport, queue_path))
    }
}

impl<T: Transport> SyncClient<T> {
    /// Create a new sync client with custom transport (for testing).
    pub fn with_transport(transport: T, queue_path: &Path) -> Self {
        SyncClient {
            inner: Arc::new(Inner {
                transport,
                queue: DeliveryQueue::new(queue_path),
                background: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn queue(&self) -> &DeliveryQueue {
        &self.inner.queue
    }

    /// Get the number of writes waiting in the queue.
    pub fn pending_count(&self) -> SyncResult<usize> {
        Ok(self.inner.queue.len()?)
    }

    /// Sends one request without any fallback.
    pub async fn dispatch(&self, request: RemoteRequest) -> Result<Value, TransportError> {
        debug!(method = ?request.method, path = %request.path, "dispatching request");
        self.inner.transport.send(request).await
    }

    /// Posts `body` to `path`, queueing it if the remote is unavailable.
    ///
    /// Credential rejections and unbuildable requests are reported as
    /// [`RemoteOutcome::Failed`] and never queued. A successful post kicks off a background drain.
    pub async fn post_with_fallback(&self, path: &str, body: Value) -> SyncResult<RemoteOutcome> {
        let request =
            RemoteRequest::post(path, body).with_idempotency_key(Uuid::new_v4().to_string());

        match self.dispatch(request.clone()).await {
            Ok(response) => {
                self.spawn_drain();
                Ok(RemoteOutcome::Delivered(response))
            }
            Err(e) if e.is_permanent() => {
                warn!(path, error = %e, "write rejected, not queueing");
                Ok(RemoteOutcome::Failed {
                    error: e.to_string(),
                })
            }
            Err(e) => {
                let entry = PendingEntry::from_request(&request, Utc::now());
                self.inner.queue.enqueue(&entry)?;
                info!(path, error = %e, "remote unavailable, write queued");
                Ok(RemoteOutcome::Queued {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Reads `path`. Reads are never queued; a successful read kicks off a
    /// background drain like a successful write does.
    pub async fn get_with_fallback(&self, path: &str) -> RemoteOutcome {
        match self.dispatch(RemoteRequest::get(path)).await {
            Ok(response) => {
                self.spawn_drain();
                RemoteOutcome::Delivered(response)
            }
            Err(e) => {
                warn!(path, error = %e, "remote read failed");
                RemoteOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Replays queued writes in order.
    ///
    /// Delivered entries are removed; failed and unreadable ones stay, in
    /// their original order, ahead of anything appended meanwhile.
    pub async fn drain(&self) -> SyncResult<DrainReport> {
        let Some(session) = self.inner.queue.try_begin_drain()? else {
            debug!("drain already running, skipping");
            return Ok(DrainReport {
                skipped: true,
                ..DrainReport::default()
            });
        };

        if session.lines().is_empty() {
            return Ok(DrainReport::default());
        }

        let mut kept = Vec::new();
        let mut attempted = 0;
        let mut delivered = 0;
        let mut unreadable = 0;
        for line in session.lines() {
            let entry: PendingEntry = match serde_json::from_str(line) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "keeping unreadable queue line");
                    kept.push(line.clone());
                    unreadable += 1;
                    continue;
                }
            };
            attempted += 1;
            match self.dispatch(entry.to_request()).await {
                Ok(_) => delivered += 1,
                Err(e) => {
                    debug!(path = %entry.path, error = %e, "queued write still failing");
                    kept.push(line.clone());
                }
            }
        }

        let remaining = session.finish(kept)?;
        info!(attempted, delivered, unreadable, remaining, "drain finished");
        Ok(DrainReport {
            skipped: false,
            attempted,
            delivered,
            unreadable,
            remaining,
        })
    }

    /// Starts a drain on the current runtime without waiting for it.
    pub fn spawn_drain(&self) {
        let client = self.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = client.drain().await {
                warn!(error = %e, "background drain failed");
            }
        });
        if let Ok(mut handles) = self.inner.background.lock() {
            handles.retain(|h| !h.is_finished());
            handles.push(handle);
        }
    }

    /// Waits for every background drain started so far.
    pub async fn settle(&self) {
        let handles = match self.inner.background.lock() {
            Ok(mut handles) => std::mem::take(&mut *handles),
            Err(_) => return,
        };
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "background drain panicked");
            }
        }
    }
}
