// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for config loading as seen from the command line.

#![allow(clippy::unwrap_used)]

use super::common::*;
use serde_json::json;

#[test]
fn missing_config_explains_how_to_create_it() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"))
        .stderr(predicate::str::contains("hint: create it with"));
}

#[test]
fn malformed_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.json"), "{ not json").unwrap();

    bracker(temp.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn missing_api_key_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &json!({ "apiUrl": "https://bracker.dev/api" }));

    bracker(temp.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("apiKey is missing"));
}

#[test]
fn api_url_needs_scheme() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        &json!({ "apiUrl": "bracker.dev/api", "apiKey": "k" }),
    );

    bracker(temp.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
}

#[test]
fn local_mode_needs_no_credentials() {
    let temp = local_home();

    bracker(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1 🫥 Lurker"));
}

#[test]
fn log_file_is_written_under_home() {
    let temp = local_home();

    bracker(temp.path()).arg("stats").assert().success();

    assert!(temp.path().join("agent.log").exists());
}
