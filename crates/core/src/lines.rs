// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Heuristic line counts from free-text diff summaries.

use regex::Regex;
use std::sync::LazyLock;

// Matches `git diff --stat` style totals: "N insertions ... M deletions" or
// "N changes". The pattern is hard-coded and known-valid.
static DIFF_STAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?i)(\d+)\s*insertions?.*?(\d+)\s*deletions?|(\d+)\s*changes?") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

fn parse_count(digits: &str) -> u64 {
    // Only digits reach here, so the only failure is overflow.
    digits.parse().unwrap_or(u64::MAX)
}

/// Estimates how many lines a change touched. Never fails and never
/// returns less than 1.
///
/// Recognises `"N insertions … M deletions"` (summed) and `"N changes"`.
/// Anything else falls back to the number of non-empty lines in the text.
pub fn extract_lines_changed(diff_summary: &str) -> u64 {
    if let Some(caps) = DIFF_STAT_RE.captures(diff_summary) {
        if let Some(changes) = caps.get(3) {
            return parse_count(changes.as_str());
        }
        let insertions = caps.get(1).map_or(0, |m| parse_count(m.as_str()));
        let deletions = caps.get(2).map_or(0, |m| parse_count(m.as_str()));
        return insertions.saturating_add(deletions);
    }

    let lines = diff_summary
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count();
    u64::try_from(lines).unwrap_or(u64::MAX).max(1)
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
