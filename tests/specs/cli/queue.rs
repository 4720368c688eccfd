// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for offline writes and the delivery queue.

#![allow(clippy::unwrap_used)]

use super::common::*;
use serde_json::Value;

fn log_build(temp: &TempDir, message: &str) -> assert_cmd::assert::Assert {
    bracker(temp.path())
        .args(["build", "--repo", "api", "--diff", "3 files changed, 40 insertions(+)"])
        .args(["-m", message])
        .assert()
}

#[test]
fn unreachable_api_queues_build() {
    let temp = offline_home();

    log_build(&temp, "feat: login")
        .success()
        .stdout(predicate::str::contains("Build logged offline"));

    let lines = pending_lines(temp.path());
    assert_eq!(lines.len(), 1);
    let entry: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(entry["method"], "POST");
    assert_eq!(entry["path"], "/builds");
    assert_eq!(entry["body"]["commit_message"], "feat: login");
    assert!(entry["id"].is_string());
    assert!(entry["timestamp"].is_string());
}

#[test]
fn queued_writes_keep_order() {
    let temp = offline_home();

    log_build(&temp, "first").success();
    bracker(temp.path())
        .args(["post", "https://x.com/me/status/1"])
        .assert()
        .success();
    log_build(&temp, "second").success();

    let paths: Vec<String> = pending_lines(temp.path())
        .iter()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["path"].to_string())
        .collect();
    assert_eq!(paths, ["\"/builds\"", "\"/posts\"", "\"/builds\""]);
}

#[test]
fn queued_build_json_reply() {
    let temp = offline_home();

    let output = bracker(temp.path())
        .args(["build", "--repo", "api", "--diff", "12 changes", "-m", "fix", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], "queued");
    assert!(json["error"].is_string());
}

#[test]
fn reads_are_never_queued() {
    let temp = offline_home();

    bracker(temp.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch stats"));

    assert!(pending_lines(temp.path()).is_empty());
}

#[test]
fn queue_status_counts_entries() {
    let temp = offline_home();
    log_build(&temp, "one").success();
    log_build(&temp, "two").success();

    bracker(temp.path())
        .args(["queue", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending writes: 2"));

    let output = bracker(temp.path())
        .args(["queue", "status", "-o", "json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["pending"], 2);
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn queue_status_without_config() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .args(["queue", "status"])
        .assert()
        .success()
        .stdout("No pending writes.\n");
}

#[test]
fn failed_flush_keeps_entries() {
    let temp = offline_home();
    log_build(&temp, "one").success();
    let before = pending_lines(temp.path());

    let output = bracker(temp.path())
        .args(["queue", "flush", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["attempted"], 1);
    assert_eq!(json["delivered"], 0);
    assert_eq!(json["remaining"], 1);
    assert_eq!(pending_lines(temp.path()), before);
}

#[test]
fn flush_requires_remote_mode() {
    let temp = local_home();

    bracker(temp.path())
        .args(["queue", "flush"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote config"));
}

#[test]
fn unreadable_lines_survive_flush() {
    let temp = offline_home();
    log_build(&temp, "one").success();
    let pending = temp.path().join("pending.jsonl");
    let mut content = std::fs::read_to_string(&pending).unwrap();
    content.push_str("{ broken\n");
    std::fs::write(&pending, &content).unwrap();

    bracker(temp.path()).args(["queue", "flush"]).assert().success();

    let lines = pending_lines(temp.path());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "{ broken");
}
