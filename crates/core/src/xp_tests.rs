// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn build_xp_with_five_day_streak() {
    let xp = calculate_build_xp(250, 40, 5);
    assert_eq!(xp.token_xp, 2);
    assert_eq!(xp.line_xp, 4);
    assert_eq!(xp.base_xp, 6);
    assert!((xp.streak_multiplier - 1.5).abs() < 1e-9);
    assert_eq!(xp.total_xp, 9);
}

#[test]
fn zero_input_earns_nothing() {
    let xp = calculate_build_xp(0, 0, 0);
    assert_eq!(xp.base_xp, 0);
    assert_eq!(xp.total_xp, 0);
    assert_eq!(xp.streak_multiplier, 1.0);
}

#[parameterized(
    no_streak = { 0, 1.0 },
    one_day = { 1, 1.1 },
    nine_days = { 9, 1.9 },
    ten_days = { 10, 2.0 },
    long_streak = { 365, 2.0 },
)]
fn multiplier_values(streak: u32, expected: f64) {
    assert!((streak_multiplier(streak) - expected).abs() < 1e-9);
}

#[test]
fn multiplier_stays_in_bounds() {
    for streak in 0..1000 {
        let m = streak_multiplier(streak);
        assert!((1.0..=2.0).contains(&m));
        if streak >= 10 {
            assert_eq!(m, 2.0);
        }
    }
}

#[test]
fn total_is_floored() {
    // base 1 × 1.5 = 1.5
    assert_eq!(calculate_build_xp(100, 0, 5).total_xp, 1);
    // base 3 × 1.1 = 3.3
    assert_eq!(calculate_build_xp(300, 9, 1).total_xp, 3);
}

#[test]
fn huge_inputs_saturate() {
    let xp = calculate_build_xp(u64::MAX, u64::MAX, 20);
    assert_eq!(xp.base_xp, u64::MAX / 100 + u64::MAX / 10);
    assert_eq!(xp.total_xp, u64::MAX);
}
