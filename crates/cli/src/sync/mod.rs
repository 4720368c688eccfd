// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote sync with a durable offline fallback.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Client    │────►│  Transport  │────►│  Scoring    │
//! │ (SyncClient)│◄────│   (trait)   │◄────│    API      │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌───────────────┐
//! │     Queue     │  (writes the remote didn't take)
//! │(DeliveryQueue)│
//! └───────────────┘
//! ```
//!
//! # Features
//!
//! - HTTPS requests with a fixed timeout and bearer credential
//! - Durable JSONL queue, fsynced per entry
//! - Idempotency key per write, reused on every retry
//! - Single drain across processes, safe against concurrent appends
//! - Injectable transport trait for testing

mod client;
mod queue;
mod transport;

pub use client::{DrainReport, RemoteOutcome, SyncClient, SyncError, SyncResult};
pub use queue::{DeliveryQueue, DrainSession, PendingEntry, QueueError, QueueResult};
pub use transport::{
    HttpTransport, Method, RemoteRequest, Transport, TransportError, TransportResult,
    IDEMPOTENCY_HEADER, REQUEST_TIMEOUT,
};

#[cfg(test)]
pub(crate) mod test_helpers;
