// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local scoring ledger.
//!
//! Used when the config says `"mode": "local"`. Every build and post is
//! appended to `builds.jsonl` as a [`LedgerEvent`] and the running aggregate
//! is kept in `stats.json`. Both files are only touched under `ledger.lock`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use bk_core::jsonl;
use bk_core::{
    calculate_streak_at, generate_tweet_draft, DraftBuild, DraftStyle, FixedPicker,
    LedgerEvent, RandomPicker, ScoreState, TemplatePicker,
};

use crate::config::Paths;
use crate::error::Result;
use crate::lock::FileLock;
use crate::tools::{BuildArgs, PostArgs, SuggestArgs, ToolReply};

const LOCK_FILE_NAME: &str = "ledger.lock";

/// File-backed local scoring.
#[derive(Debug, Clone)]
pub struct Ledger {
    events_path: PathBuf,
    stats_path: PathBuf,
    lock_path: PathBuf,
    /// Pins draft template selection; random when unset.
    template: Option<usize>,
}

impl Ledger {
    pub fn new(events_path: &Path, stats_path: &Path) -> Self {
        let lock_path = stats_path
            .parent()
            .map(|dir| dir.join(LOCK_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(LOCK_FILE_NAME));
        Ledger {
            events_path: events_path.to_path_buf(),
            stats_path: stats_path.to_path_buf(),
            lock_path,
            template: None,
        }
    }

    pub fn open(paths: &Paths) -> Self {
        Self::new(&paths.builds(), &paths.stats())
    }

    /// Always use template `index` (modulo the template count).
    #[cfg(test)]
    pub fn with_template(mut self, index: usize) -> Self {
        self.template = Some(index);
        self
    }

    fn picker(&self) -> Box<dyn TemplatePicker> {
        match self.template {
            Some(index) => Box::new(FixedPicker(index)),
            None => Box::new(RandomPicker),
        }
    }

    /// Every readable event, oldest first.
    pub fn events(&self) -> Result<Vec<LedgerEvent>> {
        let mut events = Vec::new();
        for line in jsonl::read_lines(&self.events_path)? {
            match serde_json::from_str(&line) {
                Ok(event) => events.push(event),
                Err(e) => warn!(error = %e, "skipping unreadable ledger line"),
            }
        }
        Ok(events)
    }

    /// The aggregate, backfilling `totalPosts` from the event log when an
    /// older `stats.json` lacks it.
    fn load_state(&self, events: &[LedgerEvent]) -> Result<ScoreState> {
        let content = match fs::read_to_string(&self.stats_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScoreState::default()),
            Err(e) => return Err(e.into()),
        };
        let raw: Value = serde_json::from_str(&content)?;
        let has_posts = raw.get("totalPosts").is_some();
        let mut state: ScoreState = serde_json::from_value(raw)?;
        if !has_posts {
            state.total_posts = events
                .iter()
                .filter(|e| matches!(e, LedgerEvent::Post(_)))
                .count() as u64;
        }
        Ok(state)
    }

    fn save_state(&self, state: &ScoreState) -> Result<()> {
        if let Some(parent) = self.stats_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.stats_path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(state)?)?;
        fs::rename(&tmp, &self.stats_path)?;
        Ok(())
    }

    /// Persists `state`, then appends `event`. A failed append puts
    /// `previous` back so the stats never count an event the log lacks.
    fn commit(
        &self,
        previous: &ScoreState,
        state: &ScoreState,
        event: &LedgerEvent,
    ) -> Result<()> {
        self.save_state(state)?;
        if let Err(e) = jsonl::append(&self.events_path, event) {
            warn!(error = %e, "event append failed, restoring previous stats");
            if let Err(restore) = self.save_state(previous) {
                warn!(error = %restore, "could not restore previous stats");
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Current aggregate.
    pub fn state(&self) -> Result<ScoreState> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let events = self.events()?;
        self.load_state(&events)
    }

    pub fn log_build(&self, args: BuildArgs, now: DateTime<Local>) -> Result<ToolReply> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let events = self.events()?;
        let mut state = self.load_state(&events)?;
        let previous = state.clone();

        // The multiplier reflects the streak as it stood before this build.
        let streak = calculate_streak_at(&build_times(&events), now);
        let (event, xp) = state.apply_build_with_streak(args.into(), streak, now);
        let draft = event.to_draft();

        self.commit(&previous, &state, &LedgerEvent::Build(event))?;

        let level = state.level();
        let tweet_draft =
            generate_tweet_draft(&[draft], DraftStyle::Raw, Some(&level), &mut *self.picker());

        let mut message = format!(
            "XP earned: {} | Level: {} {}",
            xp.total_xp, level.level, level.title
        );
        if level.is_gated {
            message.push_str(&format!(
                "\nYou have enough XP for level {} but need {} more posts to unlock it!",
                level.potential_level, level.posts_needed
            ));
        }
        info!(xp = xp.total_xp, level = level.level, streak, "build recorded locally");

        let data = json!({
            "xpEarned": xp.total_xp,
            "totalXp": state.total_xp,
            "level": level.level,
            "title": level.title,
            "description": level.description,
            "streak": streak,
            "isGated": level.is_gated,
            "potentialLevel": level.potential_level,
            "postsNeeded": level.posts_needed,
            "tweetDraft": tweet_draft,
            "message": message,
        });
        Ok(ToolReply::ok(message, data))
    }

    pub fn log_post(&self, args: PostArgs, now: DateTime<Local>) -> Result<ToolReply> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let events = self.events()?;
        let mut state = self.load_state(&events)?;
        let previous = state.clone();

        let before = state.level();
        let event = state.apply_post(args.into(), now);
        let xp_earned = event.xp_earned;
        self.commit(&previous, &state, &LedgerEvent::Post(event))?;

        let level = state.level();
        let levels_unlocked: Vec<u32> = if level.level > before.level {
            vec![level.level]
        } else {
            Vec::new()
        };

        let mut message = format!("Post logged! +{xp_earned} XP");
        if !levels_unlocked.is_empty() {
            message.push_str(&format!(" | Unlocked level {} {}", level.level, level.title));
        }
        info!(level = level.level, posts = state.total_posts, "post recorded locally");

        let data = json!({
            "xpEarned": xp_earned,
            "totalXp": state.total_xp,
            "postCount": state.total_posts,
            "level": level.level,
            "title": level.title,
            "description": level.description,
            "levelsUnlocked": levels_unlocked,
            "postsForNext": level.posts_for_next,
        });
        Ok(ToolReply::ok(message, data))
    }

    pub fn get_stats(&self, now: DateTime<Local>) -> Result<ToolReply> {
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let events = self.events()?;
        let state = self.load_state(&events)?;
        let level = state.level();
        let streak = calculate_streak_at(&build_times(&events), now);

        let data = json!({
            "totalXp": state.total_xp,
            "level": level.level,
            "title": level.title,
            "description": level.description,
            "totalBuilds": state.total_builds,
            "totalPosts": state.total_posts,
            "totalTokens": state.total_tokens,
            "streak": streak,
            "lastBuildDate": state.last_build_date,
            "isGated": level.is_gated,
            "potentialLevel": level.potential_level,
            "postsNeeded": level.posts_needed,
            "postsForNext": level.posts_for_next,
            "progress": state.progress(),
        });
        let message = format!(
            "Level {} {} | {} XP | {} day streak",
            level.level, level.title, state.total_xp, streak
        );
        Ok(ToolReply::ok(message, data))
    }

    pub fn suggest_tweet(&self, args: SuggestArgs, now: DateTime<Local>) -> Result<ToolReply> {
        let style = args.style()?;
        let _guard = FileLock::exclusive(&self.lock_path)?;
        let events = self.events()?;
        let state = self.load_state(&events)?;
        let level = state.level();

        let today = now.date_naive();
        let is_today = |ts: DateTime<Utc>| ts.with_timezone(&Local).date_naive() == today;
        let builds_today: Vec<DraftBuild> = events
            .iter()
            .filter_map(|e| match e {
                LedgerEvent::Build(b) if is_today(b.timestamp) => Some(b.to_draft()),
                _ => None,
            })
            .collect();
        let posts_today = events
            .iter()
            .filter(|e| matches!(e, LedgerEvent::Post(p) if is_today(p.timestamp)))
            .count();

        let tweet_draft =
            generate_tweet_draft(&builds_today, style, Some(&level), &mut *self.picker());

        let data = json!({
            "tweetDraft": tweet_draft,
            "buildsToday": builds_today.len(),
            "postsToday": posts_today,
            "currentLevel": level.level,
            "title": level.title,
            "isGated": level.is_gated,
            "postsNeeded": level.posts_needed,
        });
        Ok(ToolReply::ok(tweet_draft, data))
    }
}

fn build_times(events: &[LedgerEvent]) -> Vec<DateTime<Utc>> {
    events
        .iter()
        .filter_map(|e| match e {
            LedgerEvent::Build(b) => Some(b.timestamp),
            LedgerEvent::Post(_) => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
