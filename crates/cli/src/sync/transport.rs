// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the remote scoring API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTPS requests for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every remote request is abandoned after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the per-operation idempotency key.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within [`REQUEST_TIMEOUT`].
    #[error("request timeout")]
    Timeout,

    /// The endpoint could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote rejected the credential (401/403).
    #[error("API {status}: {body}\n  hint: check apiKey in your bracker config")]
    Unauthorized { status: u16, body: String },

    /// Any other non-success status.
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The request could not be built, e.g. the configured URL is unusable.
    #[error("invalid request: {0}\n  hint: check apiUrl in your bracker config")]
    InvalidRequest(String),
}

impl TransportError {
    /// Credential failures are not retried from the live path.
    pub fn is_auth(&self) -> bool {
        matches!(self, TransportError::Unauthorized { .. })
    }

    /// Errors that a later retry cannot fix. Writes failing this way are
    /// reported, never queued.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            TransportError::Unauthorized { .. } | TransportError::InvalidRequest(_)
        )
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => TransportError::Unauthorized { status, body },
            _ => TransportError::Status { status, body },
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// HTTP method of a remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A single request against the remote API.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    /// Path appended to the configured base URL, e.g. `/builds`.
    pub path: String,
    pub body: Option<Value>,
    pub idempotency_key: Option<String>,
}

impl RemoteRequest {
    pub fn get(path: impl Into<String>) -> Self {
        RemoteRequest {
            method: Method::Get,
            path: path.into(),
            body: None,
            idempotency_key: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        RemoteRequest {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            idempotency_key: None,
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Transport trait for request/response communication.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations.
pub trait Transport: Send + Sync + 'static {
    /// Sends one request and returns the parsed response body.
    fn send(
        &self,
        request: RemoteRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Value>> + Send + '_>>;
}

/// HTTPS transport implementation using reqwest.
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport against `base_url`, authenticating with `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        Ok(HttpTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else if e.is_decode() || e.is_body() {
        TransportError::SerializationError(e.to_string())
    } else {
        TransportError::ConnectionFailed(e.to_string())
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: RemoteRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Value>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}{}", self.base_url, request.path);
            let mut builder = match request.method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
            };
            builder = builder.bearer_auth(&self.api_key);
            if let Some(key) = &request.idempotency_key {
                builder = builder.header(IDEMPOTENCY_HEADER, key);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            let text = response.text().await.map_err(map_reqwest_error)?;

            if !status.is_success() {
                return Err(TransportError::from_status(status.as_u16(), text));
            }
            Ok(parse_body(text))
        })
    }
}

/// Successful bodies are JSON; anything else, including an empty body, is
/// passed through as a string.
pub(crate) fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
