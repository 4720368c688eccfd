// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Share-draft generation.
//!
//! Each style has a small set of templates. Which one is used is decided by a
//! [`TemplatePicker`], so callers can make the choice deterministic.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::level::LevelResult;

/// Draft returned when there is nothing to talk about.
pub const FALLBACK_DRAFT: &str = "Just shipped something! #buildinpublic";

/// Tone of a generated draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum DraftStyle {
    #[default]
    Raw,
    Polished,
    Educational,
}

impl DraftStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStyle::Raw => "raw",
            DraftStyle::Polished => "polished",
            DraftStyle::Educational => "educational",
        }
    }
}

impl fmt::Display for DraftStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DraftStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(DraftStyle::Raw),
            "polished" => Ok(DraftStyle::Polished),
            "educational" => Ok(DraftStyle::Educational),
            _ => Err(Error::InvalidStyle(s.to_string())),
        }
    }
}

/// The slice of a build a draft talks about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBuild {
    pub repo: Option<String>,
    pub xp_earned: u64,
    pub conversation_summary: Option<String>,
}

/// Source of template choices.
pub trait TemplatePicker {
    /// Returns an index in `0..count`. `count` is never zero.
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniformly random choice backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl TemplatePicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }
}

/// Always picks the same index (wrapped to the template count).
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.0 % count
    }
}

fn templates(
    style: DraftStyle,
    builds: &[DraftBuild],
    level: Option<&LevelResult>,
) -> Vec<String> {
    let count = builds.len();
    let total_xp = builds
        .iter()
        .fold(0u64, |sum, b| sum.saturating_add(b.xp_earned));

    let mut repos: Vec<&str> = Vec::new();
    for repo in builds.iter().filter_map(|b| b.repo.as_deref()) {
        if !repo.is_empty() && !repos.contains(&repo) {
            repos.push(repo);
        }
    }

    let level_text = level
        .map(|l| format!("{} (Level {})", l.title, l.level))
        .unwrap_or_default();
    let gate_text = match level {
        Some(l) if l.is_gated => "Need more posts to unlock next level!",
        _ => "",
    };

    match style {
        DraftStyle::Raw => vec![
            format!("Pushed {count} commits today. {level_text} XP +{total_xp} {gate_text} #buildinpublic"),
            format!("{count} builds shipped {level_text} Working on: {} #buildinpublic", repos.join(", ")),
            format!("Another day, another {count} commits {level_text} +{total_xp} XP {gate_text} #buildinpublic"),
        ],
        DraftStyle::Polished => vec![
            format!(
                "Productive coding session! Shipped {count} features across {} projects. {level_text} The grind continues! {gate_text} #buildinpublic",
                repos.len()
            ),
            format!("Daily dev log: {count} commits pushed, {total_xp} XP earned. {level_text} Building something cool! #buildinpublic"),
        ],
        DraftStyle::Educational => {
            let lesson = builds
                .first()
                .and_then(|b| b.conversation_summary.as_deref())
                .filter(|s| !s.is_empty())
                .unwrap_or("Code is poetry in motion");
            vec![
                format!("Today I learned: {lesson} {level_text} {count} commits {total_xp} XP #buildinpublic"),
                format!(
                    "Dev insight: {level_text} Working on {} taught me patience and persistence {gate_text} #buildinpublic",
                    repos.join(" + ")
                ),
            ]
        }
    }
}

/// Generates a share draft for a set of builds.
pub fn generate_tweet_draft(
    builds: &[DraftBuild],
    style: DraftStyle,
    level: Option<&LevelResult>,
    picker: &mut dyn TemplatePicker,
) -> String {
    if builds.is_empty() && level.is_none() {
        return FALLBACK_DRAFT.to_string();
    }

    let mut options = templates(style, builds, level);
    let index = picker.pick(options.len()).min(options.len() - 1);
    options.swap_remove(index)
}

#[cfg(test)]
#[path = "draft_tests.rs"]
mod tests;
