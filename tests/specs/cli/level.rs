// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the offline `level`, `tiers` and `schema` commands.

#![allow(clippy::unwrap_used)]

use super::common::*;
use yare::parameterized;

#[test]
fn level_works_without_config() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .args(["level", "0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Level 1 🫥 Lurker"));
}

#[parameterized(
    first_level_up = { 75, 0, 2, 2 },
    gated_at_ten = { 28875, 0, 10, 11 },
    unlocked_by_post = { 28875, 1, 11, 11 },
)]
fn level_json(xp: u64, posts: u64, level: u64, potential: u64) {
    let temp = TempDir::new().unwrap();

    let output = bracker(temp.path())
        .args(["level", &xp.to_string(), "--posts", &posts.to_string(), "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["level"], level);
    assert_eq!(json["potentialLevel"], potential);
    assert_eq!(json["isGated"], level < potential);
    assert_eq!(json["xp"], xp);
    assert!(json["progress"]["required"].as_u64().unwrap() > 0);
}

#[test]
fn gated_level_text_mentions_posts() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .args(["level", "28875"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gated: XP reaches level 11"));
}

#[test]
fn level_rejects_negative_xp() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path()).args(["level", "-5"]).assert().failure();
}

#[test]
fn tiers_lists_all_eleven() {
    let temp = TempDir::new().unwrap();

    let output = bracker(temp.path())
        .args(["tiers", "-o", "json"])
        .output()
        .unwrap();

    let json = stdout_json(&output);
    let tiers = json.as_array().unwrap();
    assert_eq!(tiers.len(), 11);
    assert_eq!(tiers[0]["name"], "Lurker");
    assert_eq!(tiers[10]["name"], "Legend");
}

#[test]
fn schema_for_one_tool() {
    let temp = TempDir::new().unwrap();

    let output = bracker(temp.path())
        .args(["schema", "log_post"])
        .output()
        .unwrap();

    let json = stdout_json(&output);
    assert_eq!(json["type"], "object");
    assert!(json["properties"]["url"].is_object());
}

#[test]
fn schema_rejects_unknown_tool() {
    let temp = TempDir::new().unwrap();

    bracker(temp.path())
        .args(["schema", "log_deploy"])
        .assert()
        .failure();
}
