// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! XP awards for builds and posts.

use serde::{Deserialize, Serialize};

/// Flat XP awarded for every shared post.
pub const POST_XP: u64 = 50;

/// Tokens consumed per XP point.
const TOKENS_PER_XP: u64 = 100;
/// Changed lines per XP point.
const LINES_PER_XP: u64 = 10;
/// Upper bound of the streak multiplier.
const MAX_STREAK_MULTIPLIER: f64 = 2.0;

/// Breakdown of the XP earned by one build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildXp {
    pub token_xp: u64,
    pub line_xp: u64,
    pub base_xp: u64,
    pub streak_multiplier: f64,
    pub total_xp: u64,
}

/// Multiplier for a streak of `streak` days: `1 + 0.1 × streak`, capped at 2.
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + f64::from(streak) * 0.1).min(MAX_STREAK_MULTIPLIER)
}

/// Computes the XP award for one build.
pub fn calculate_build_xp(tokens_used: u64, lines_changed: u64, streak: u32) -> BuildXp {
    let token_xp = tokens_used / TOKENS_PER_XP;
    let line_xp = lines_changed / LINES_PER_XP;
    let base_xp = token_xp.saturating_add(line_xp);
    let streak_multiplier = streak_multiplier(streak);
    // Float to int casts saturate.
    let total_xp = (base_xp as f64 * streak_multiplier).floor() as u64;

    BuildXp {
        token_xp,
        line_xp,
        base_xp,
        streak_multiplier,
        total_xp,
    }
}

#[cfg(test)]
#[path = "xp_tests.rs"]
mod tests;
