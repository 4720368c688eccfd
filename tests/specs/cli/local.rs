// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for local scoring (`"mode": "local"`).

#![allow(clippy::unwrap_used)]

use super::common::*;

#[test]
fn build_is_scored_and_recorded() {
    let temp = local_home();

    let output = bracker(temp.path())
        .args(["build", "--repo", "api", "--diff", "100 changes", "-m", "feat: x"])
        .args(["--tokens", "500", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["xpEarned"], 15);
    assert_eq!(json["data"]["totalXp"], 15);
    assert_eq!(json["data"]["streak"], 0);
    assert!(json["data"]["tweetDraft"].is_string());

    let builds = std::fs::read_to_string(temp.path().join("builds.jsonl")).unwrap();
    assert_eq!(builds.lines().count(), 1);
    assert!(temp.path().join("stats.json").exists());
}

#[test]
fn post_adds_fixed_xp() {
    let temp = local_home();

    let output = bracker(temp.path())
        .args(["post", "https://x.com/me/status/1", "-o", "json"])
        .output()
        .unwrap();

    let json = stdout_json(&output);
    assert_eq!(json["data"]["xpEarned"], 50);
    assert_eq!(json["data"]["postCount"], 1);
}

#[test]
fn stats_accumulate() {
    let temp = local_home();
    bracker(temp.path())
        .args(["post", "https://x.com/me/status/1"])
        .assert()
        .success();
    bracker(temp.path())
        .args(["post", "https://x.com/me/status/2", "--platform", "linkedin"])
        .assert()
        .success();

    let output = bracker(temp.path())
        .args(["stats", "-o", "json"])
        .output()
        .unwrap();

    let json = stdout_json(&output);
    assert_eq!(json["data"]["totalPosts"], 2);
    assert_eq!(json["data"]["totalXp"], 100);
    assert_eq!(json["data"]["level"], 2);
}

#[test]
fn suggest_without_builds_today() {
    let temp = local_home();

    bracker(temp.path()).arg("suggest").assert().success();
}

#[test]
fn suggest_rejects_unknown_style() {
    let temp = local_home();

    bracker(temp.path())
        .args(["suggest", "--style", "spicy"])
        .assert()
        .failure();
}
