// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daily build streaks.
//!
//! A streak counts consecutive calendar days with at least one build. The
//! anchor day is passed in so results never depend on the wall clock.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Counts consecutive build days ending today or yesterday.
///
/// Dates are deduplicated and walked newest first. A date extends the streak
/// when it lies `streak` or `streak + 1` days before `today`, so an account
/// that has not built yet today keeps yesterday's streak.
pub fn calculate_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut streak = 0u32;
    for date in distinct.iter().rev() {
        let days = (today - *date).num_days();
        if days == i64::from(streak) || days == i64::from(streak) + 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// [`calculate_streak`] over timestamps, bucketed by local calendar day and
/// anchored at the local date of `now`.
pub fn calculate_streak_at<Tz: TimeZone>(timestamps: &[DateTime<Tz>], now: DateTime<Local>) -> u32 {
    calculate_streak(
        timestamps
            .iter()
            .map(|ts| ts.with_timezone(&Local).date_naive()),
        now.date_naive(),
    )
}

/// Streak value for a new build made on `today`.
///
/// Same day as the last build keeps the streak, the following day extends
/// it, anything else starts over at 1.
pub fn next_streak(last_build: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    match last_build {
        Some(last) if last == today => current,
        Some(last) if today.pred_opt() == Some(last) => current.saturating_add(1),
        _ => 1,
    }
}

#[cfg(test)]
#[path = "streak_tests.rs"]
mod tests;
