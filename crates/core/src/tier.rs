// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Level tiers.
//!
//! Every level maps to one of eleven tiers. A tier starts at its
//! `min_level` and covers every level up to the next tier's threshold; the
//! last tier is open-ended.

use serde::Serialize;

/// A named band of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelTier {
    /// First level belonging to this tier.
    pub min_level: u32,
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl LevelTier {
    /// Display title, e.g. `"🔨 Maker"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }

    /// Human readable level range, e.g. `"11-15"` or `"51+"`.
    pub fn range_label(&self) -> String {
        match self.next() {
            Some(next) => format!("{}-{}", self.min_level, next.min_level - 1),
            None => format!("{}+", self.min_level),
        }
    }

    /// Posting requirement for levels in this tier, if any.
    pub fn gate_label(&self) -> Option<&'static str> {
        match self.min_level {
            0..=10 => None,
            11..=20 => Some("1 post per level"),
            21..=30 => Some("2 posts per level"),
            _ => Some("3 posts per level"),
        }
    }

    fn next(&self) -> Option<&'static LevelTier> {
        TIERS.iter().find(|t| t.min_level > self.min_level)
    }
}

/// The tier table, sorted by ascending `min_level`.
pub const TIERS: [LevelTier; 11] = [
    LevelTier {
        min_level: 1,
        emoji: "🫥",
        name: "Lurker",
        description: "Nobody. Zero followers energy.",
    },
    LevelTier {
        min_level: 6,
        emoji: "🌱",
        name: "Seedling",
        description: "First commits, first posts. Sprouting.",
    },
    LevelTier {
        min_level: 11,
        emoji: "🔨",
        name: "Maker",
        description: "Actually building stuff. People notice.",
    },
    LevelTier {
        min_level: 16,
        emoji: "📢",
        name: "Broadcaster",
        description: "Posting regularly. Small following.",
    },
    LevelTier {
        min_level: 21,
        emoji: "🔥",
        name: "Hot Take",
        description: "Content hits different. Growing fast.",
    },
    LevelTier {
        min_level: 26,
        emoji: "⚡",
        name: "Shipper",
        description: "Ships weekly. Known in the scene.",
    },
    LevelTier {
        min_level: 31,
        emoji: "🏗️",
        name: "Architect",
        description: "People study your repos.",
    },
    LevelTier {
        min_level: 36,
        emoji: "🎯",
        name: "Influencer",
        description: "\"Have you seen what X built?\"",
    },
    LevelTier {
        min_level: 41,
        emoji: "👑",
        name: "Thought Leader",
        description: "Industry talks. Podcast invites.",
    },
    LevelTier {
        min_level: 46,
        emoji: "🦄",
        name: "Unicorn",
        description: "Everyone knows your name.",
    },
    LevelTier {
        min_level: 51,
        emoji: "🌍",
        name: "Legend",
        description: "Changed the game.",
    },
];

/// Returns the tier for a level: the last tier whose threshold is at most
/// `level`. Levels below 1 fall into the first tier.
pub fn tier_for_level(level: u32) -> &'static LevelTier {
    let mut current = &TIERS[0];
    for tier in TIERS.iter() {
        if level >= tier.min_level {
            current = tier;
        }
    }
    current
}

#[cfg(test)]
#[path = "tier_tests.rs"]
mod tests;
