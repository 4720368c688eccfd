// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens on the discard port, so every request fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

/// `bracker` with an isolated home directory.
pub fn bracker(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bracker").unwrap();
    cmd.env("BRACKER_HOME", home).env_remove("BRACKER_LOG");
    cmd
}

pub fn write_config(home: &Path, config: &Value) {
    std::fs::create_dir_all(home).unwrap();
    std::fs::write(home.join("config.json"), config.to_string()).unwrap();
}

/// Home whose config points at an API that can't be reached.
pub fn offline_home() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &serde_json::json!({
            "apiUrl": UNREACHABLE_API,
            "apiKey": "test-key",
            "username": "tester",
        }),
    );
    temp
}

/// Home configured for local scoring.
pub fn local_home() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &serde_json::json!({ "mode": "local" }));
    temp
}

pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn pending_lines(home: &Path) -> Vec<String> {
    std::fs::read_to_string(home.join("pending.jsonl"))
        .map(|s| s.lines().map(String::from).collect())
        .unwrap_or_default()
}
