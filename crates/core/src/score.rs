// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Account aggregate and the events that feed it.
//!
//! [`ScoreState`] only changes through [`ScoreState::apply_build`] and
//! [`ScoreState::apply_post`]. Both return the immutable event that should be
//! appended to the event log.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::DraftBuild;
use crate::level::{calculate_level, xp_progress, LevelResult, XpProgress};
use crate::lines::extract_lines_changed;
use crate::streak::next_streak;
use crate::xp::{calculate_build_xp, BuildXp, POST_XP};

/// Default platform for posts.
pub const DEFAULT_PLATFORM: &str = "twitter";

/// Aggregate scoring state for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    pub total_xp: u64,
    pub total_builds: u64,
    #[serde(default)]
    pub total_posts: u64,
    pub total_tokens: u64,
    #[serde(default)]
    pub current_streak: u32,
    pub last_build_date: Option<DateTime<Utc>>,
}

/// A build as reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInput {
    pub repo: Option<String>,
    pub diff_summary: String,
    pub conversation_summary: Option<String>,
    pub tokens_used: u64,
    pub commit_message: String,
}

/// A shared post as reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub url: String,
    pub platform: String,
    pub content: Option<String>,
}

impl PostInput {
    pub fn new(url: impl Into<String>) -> Self {
        PostInput {
            url: url.into(),
            platform: DEFAULT_PLATFORM.to_string(),
            content: None,
        }
    }
}

/// A recorded build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEvent {
    pub repo: Option<String>,
    pub diff_summary: String,
    pub conversation_summary: Option<String>,
    pub tokens_used: u64,
    pub commit_message: String,
    pub lines_changed: u64,
    pub xp_earned: u64,
    pub streak: u32,
    pub timestamp: DateTime<Utc>,
}

impl BuildEvent {
    pub fn to_draft(&self) -> DraftBuild {
        DraftBuild {
            repo: self.repo.clone(),
            xp_earned: self.xp_earned,
            conversation_summary: self.conversation_summary.clone(),
        }
    }
}

/// A recorded post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEvent {
    pub url: String,
    pub platform: String,
    #[serde(default)]
    pub content: Option<String>,
    pub xp_earned: u64,
    pub timestamp: DateTime<Utc>,
}

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerEvent {
    Build(BuildEvent),
    Post(PostEvent),
}

impl LedgerEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::Build(b) => b.timestamp,
            LedgerEvent::Post(p) => p.timestamp,
        }
    }
}

impl ScoreState {
    /// Current level, gated by the post count.
    pub fn level(&self) -> LevelResult {
        calculate_level(self.total_xp, self.total_posts)
    }

    /// Progress through the current XP-only level.
    pub fn progress(&self) -> XpProgress {
        xp_progress(self.total_xp)
    }

    /// Records a build made at `now`.
    ///
    /// The streak continues from the last recorded build. Calendar days are
    /// taken in `now`'s time zone.
    pub fn apply_build<Tz: TimeZone>(
        &mut self,
        input: BuildInput,
        now: DateTime<Tz>,
    ) -> (BuildEvent, BuildXp) {
        let tz = now.timezone();
        let today = now.date_naive();
        let last_day = self
            .last_build_date
            .map(|ts| ts.with_timezone(&tz).date_naive());

        let streak = next_streak(last_day, self.current_streak, today);
        self.apply_build_with_streak(input, streak, now)
    }

    /// Records a build made at `now` with an externally computed streak,
    /// e.g. one derived from an event log with [`crate::calculate_streak`].
    pub fn apply_build_with_streak<Tz: TimeZone>(
        &mut self,
        input: BuildInput,
        streak: u32,
        now: DateTime<Tz>,
    ) -> (BuildEvent, BuildXp) {
        let lines_changed = extract_lines_changed(&input.diff_summary);
        let xp = calculate_build_xp(input.tokens_used, lines_changed, streak);
        let timestamp = now.with_timezone(&Utc);

        self.total_xp = self.total_xp.saturating_add(xp.total_xp);
        self.total_builds = self.total_builds.saturating_add(1);
        self.total_tokens = self.total_tokens.saturating_add(input.tokens_used);
        self.current_streak = streak;
        self.last_build_date = Some(timestamp);

        let event = BuildEvent {
            repo: input.repo,
            diff_summary: input.diff_summary,
            conversation_summary: input.conversation_summary,
            tokens_used: input.tokens_used,
            commit_message: input.commit_message,
            lines_changed,
            xp_earned: xp.total_xp,
            streak,
            timestamp,
        };
        (event, xp)
    }

    /// Records a post made at `now`.
    pub fn apply_post<Tz: TimeZone>(&mut self, input: PostInput, now: DateTime<Tz>) -> PostEvent {
        self.total_xp = self.total_xp.saturating_add(POST_XP);
        self.total_posts = self.total_posts.saturating_add(1);

        PostEvent {
            url: input.url,
            platform: input.platform,
            content: input.content,
            xp_earned: POST_XP,
            timestamp: now.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
