// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bk-core: Leveling engine for bracker
//!
//! This crate turns raw activity (builds and posts) into experience points,
//! levels, tiers and streaks. Everything except the [`jsonl`] helpers is pure:
//! no clocks are read implicitly and no state lives in the process.

pub mod draft;
pub mod error;
pub mod jsonl;
pub mod level;
pub mod lines;
pub mod score;
pub mod streak;
pub mod tier;
pub mod xp;

pub use draft::{
    generate_tweet_draft, DraftBuild, DraftStyle, FixedPicker, RandomPicker, TemplatePicker,
    FALLBACK_DRAFT,
};
pub use error::{Error, Result};
pub use level::{
    calculate_level, cumulative_threshold, max_level_for_posts, posts_required_for_level,
    xp_for_next_level, xp_progress, LevelResult, XpProgress,
};
pub use lines::extract_lines_changed;
pub use score::{
    BuildEvent, BuildInput, LedgerEvent, PostEvent, PostInput, ScoreState, DEFAULT_PLATFORM,
};
pub use streak::{calculate_streak, calculate_streak_at, next_streak};
pub use tier::{tier_for_level, LevelTier, TIERS};
pub use xp::{calculate_build_xp, streak_multiplier, BuildXp, POST_XP};
