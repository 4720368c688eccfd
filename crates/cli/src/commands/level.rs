// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline level math: `bracker level` and `bracker tiers`.

use bk_core::{calculate_level, xp_progress, LevelResult, XpProgress, TIERS};

use crate::cli::OutputFormat;
use crate::error::Result;

use super::print_json;

pub fn level(xp: u64, posts: u64, output: OutputFormat) -> Result<()> {
    let result = calculate_level(xp, posts);
    let progress = xp_progress(xp);

    match output {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&result)?;
            value["xp"] = xp.into();
            value["progress"] = serde_json::to_value(progress)?;
            print_json(&value)?;
        }
        OutputFormat::Text => print!("{}", render_level(xp, &result, &progress)),
    }
    Ok(())
}

pub fn tiers(output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(&TIERS)?,
        OutputFormat::Text => print!("{}", render_tiers()),
    }
    Ok(())
}

pub fn render_level(xp: u64, result: &LevelResult, progress: &XpProgress) -> String {
    let mut out = format!("Level {} {}\n", result.level, result.title);
    out.push_str(&format!("  {}\n", result.description));
    out.push_str(&format!(
        "  XP: {xp} ({}/{} into level, {:.0}%)\n",
        progress.current, progress.required, progress.percentage
    ));
    if result.is_gated {
        out.push_str(&format!(
            "  Gated: XP reaches level {}, share {} more post(s) to unlock it\n",
            result.potential_level, result.posts_needed
        ));
    } else if result.posts_for_next > 0 {
        out.push_str(&format!(
            "  Next level needs {} more post(s)\n",
            result.posts_for_next
        ));
    }
    out
}

pub fn render_tiers() -> String {
    let mut out = String::new();
    for tier in TIERS.iter() {
        let gate = tier.gate_label().unwrap_or("no posts required");
        out.push_str(&format!(
            "{:<7} {:<18} {:<20} {}\n",
            tier.range_label(),
            tier.title(),
            gate,
            tier.description
        ));
    }
    out
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
