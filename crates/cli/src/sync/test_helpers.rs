// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use super::queue::PendingEntry;
use super::transport::{Method, TransportError};

/// A build payload tagged with `n` so order can be checked.
pub fn make_build_body(n: u64) -> Value {
    json!({
        "repo": format!("repo-{n}"),
        "diff_summary": "3 files changed, 10 insertions(+), 2 deletions(-)",
        "commit_message": format!("commit {n}"),
        "tokens_used": 1000 * n,
    })
}

/// A queued build write with idempotency key `id-<n>`.
pub fn make_test_entry(n: u64) -> PendingEntry {
    PendingEntry {
        id: Some(format!("id-{n}")),
        method: Method::Post,
        path: "/builds".to_string(),
        body: Some(make_build_body(n)),
        timestamp: Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
    }
}

pub fn offline_error() -> TransportError {
    TransportError::ConnectionFailed("connection refused".into())
}

/// A local HTTP endpoint answering one request per connection with the
/// given `(status, body)` pairs, in order.
///
/// Joining the handle returns the raw requests it received.
pub fn serve_responses(
    responses: Vec<(u16, &'static str)>,
) -> (String, std::thread::JoinHandle<Vec<String>>) {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            requests.push(request);
        }
        requests
    });

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    (base_url, handle)
}
