// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Level curve and post gating.
//!
//! Advancing from level `L` to `L + 1` costs `L² × 75` XP. The level implied
//! by XP alone is the *potential* level; the *actual* level may be capped
//! when the account has not shared enough posts to justify it.

use serde::{Deserialize, Serialize};

use crate::tier::tier_for_level;

/// XP cost multiplier of the level curve.
const XP_PER_LEVEL_SQUARED: u64 = 75;

/// Derived level information for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    /// Actual (gated) level.
    pub level: u32,
    /// Level implied by XP alone.
    pub potential_level: u32,
    /// `"<emoji> <name>"` of the actual level's tier.
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub name: String,
    pub is_gated: bool,
    /// Posts still missing for the potential level. Negative when the
    /// account has more posts than required.
    pub posts_needed: i64,
    /// Posts still missing for the level after the actual one.
    pub posts_for_next: i64,
}

/// XP earned inside the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpProgress {
    pub current: u64,
    pub required: u64,
    pub percentage: f64,
}

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    let level = u64::from(level);
    level
        .saturating_mul(level)
        .saturating_mul(XP_PER_LEVEL_SQUARED)
}

/// Total XP needed to reach `level` starting from zero.
pub fn cumulative_threshold(level: u32) -> u64 {
    (1..level).fold(0u64, |total, l| total.saturating_add(xp_for_next_level(l)))
}

/// Walks the level curve. Returns the XP-only level and the cumulative XP
/// at which that level starts.
fn walk_curve(xp: u64) -> (u32, u64) {
    let mut level = 1u32;
    let mut cumulative = 0u64;

    loop {
        let required = xp_for_next_level(level);
        match cumulative.checked_add(required) {
            Some(next) if next <= xp => {
                cumulative = next;
                level += 1;
            }
            _ => return (level, cumulative),
        }
    }
}

/// Number of posts an account needs before `level` is unlocked.
pub fn posts_required_for_level(level: u32) -> u64 {
    let level = u64::from(level);
    match level {
        0..=10 => 0,
        11..=20 => level - 10,
        21..=30 => 10 + (level - 20) * 2,
        _ => 30 + (level - 30) * 3,
    }
}

/// Highest level a given post count unlocks.
pub fn max_level_for_posts(post_count: u64) -> u32 {
    let level = match post_count {
        0 => 10,
        1..=9 => 10 + post_count,
        10..=29 => 20 + (post_count - 10) / 2,
        _ => 30 + (post_count - 30) / 3,
    };
    u32::try_from(level).unwrap_or(u32::MAX)
}

fn signed_difference(required: u64, have: u64) -> i64 {
    let required = i64::try_from(required).unwrap_or(i64::MAX);
    let have = i64::try_from(have).unwrap_or(i64::MAX);
    required.saturating_sub(have)
}

/// Computes actual and potential level for an account.
pub fn calculate_level(xp: u64, post_count: u64) -> LevelResult {
    let (potential_level, _) = walk_curve(xp);

    let required_posts = posts_required_for_level(potential_level);
    let level = if post_count >= required_posts {
        potential_level
    } else {
        potential_level.min(max_level_for_posts(post_count))
    };

    let tier = tier_for_level(level);

    LevelResult {
        level,
        potential_level,
        title: tier.title(),
        description: tier.description.to_string(),
        emoji: tier.emoji.to_string(),
        name: tier.name.to_string(),
        is_gated: level < potential_level,
        posts_needed: signed_difference(required_posts, post_count),
        posts_for_next: signed_difference(
            posts_required_for_level(level.saturating_add(1)),
            post_count,
        ),
    }
}

/// Progress through the current (XP-only) level.
pub fn xp_progress(xp: u64) -> XpProgress {
    let (level, cumulative) = walk_curve(xp);
    let required = xp_for_next_level(level);
    let current = xp - cumulative;

    XpProgress {
        current,
        required,
        percentage: current as f64 / required as f64 * 100.0,
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
