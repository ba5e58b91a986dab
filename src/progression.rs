// ABOUTME: Pure progression math for the XP/level curve and display titles
// ABOUTME: No I/O or state; every function is deterministic in its inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progression math
//!
//! The level curve is an incremental cost function: advancing to level `L`
//! costs `round(100 * L * 1.2)` XP, with no cost to be at level 1. Total XP
//! therefore resolves to the largest level whose cumulative step cost fits.

/// Incremental XP cost to advance into `level` from `level - 1`
///
/// Level 1 is free; the curve only charges from level 2 upward.
#[must_use]
pub fn xp_for_level(level: i32) -> i64 {
    if level <= 1 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    {
        (100.0 * f64::from(level) * 1.2).round() as i64
    }
}

/// Cumulative XP required to reach `level` from zero
#[must_use]
pub fn cumulative_xp_for_level(level: i32) -> i64 {
    (2..=level).map(xp_for_level).sum()
}

/// Resolve the level for a given total XP
///
/// Iterates the step costs, accumulating until the next level would exceed
/// `total_xp`. Monotonic non-decreasing in `total_xp`; returns 1 for 0 XP.
#[must_use]
pub fn level_for_xp(total_xp: i64) -> i32 {
    let mut level = 1;
    let mut accumulated = 0;
    loop {
        let next = xp_for_level(level + 1);
        if accumulated + next > total_xp {
            break;
        }
        accumulated += next;
        level += 1;
    }
    level
}

/// Display title for a level
#[must_use]
pub const fn title_for_level(level: i32) -> &'static str {
    if level <= 5 {
        "Beginner Lifter"
    } else if level <= 10 {
        "Dedicated Athlete"
    } else if level <= 20 {
        "Iron Warrior"
    } else if level <= 35 {
        "Elite Performer"
    } else {
        "Legendary"
    }
}

/// XP earned beyond the cumulative cost of the current level, clamped to zero
#[must_use]
pub fn xp_in_current_level(total_xp: i64, level: i32) -> i64 {
    (total_xp - cumulative_xp_for_level(level)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_level_curve() {
        assert_eq!(xp_for_level(0), 0);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(2), 240);
        assert_eq!(xp_for_level(3), 360);
        assert_eq!(xp_for_level(10), 1200);
    }

    #[test]
    fn test_level_for_xp_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(239), 1);
        assert_eq!(level_for_xp(240), 2);
        // Level 3 requires 240 + 360 = 600 cumulative
        assert_eq!(level_for_xp(599), 2);
        assert_eq!(level_for_xp(600), 3);
    }

    #[test]
    fn test_level_for_xp_monotonic() {
        let mut last = 0;
        for xp in (0..20_000).step_by(37) {
            let level = level_for_xp(xp);
            assert!(level >= last, "level dropped at xp={xp}");
            last = level;
        }
    }

    #[test]
    fn test_cumulative_matches_step_costs() {
        for level in 1..30 {
            assert_eq!(
                cumulative_xp_for_level(level + 1),
                cumulative_xp_for_level(level) + xp_for_level(level + 1)
            );
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(title_for_level(1), "Beginner Lifter");
        assert_eq!(title_for_level(5), "Beginner Lifter");
        assert_eq!(title_for_level(6), "Dedicated Athlete");
        assert_eq!(title_for_level(20), "Iron Warrior");
        assert_eq!(title_for_level(21), "Elite Performer");
        assert_eq!(title_for_level(36), "Legendary");
    }

    #[test]
    fn test_xp_in_current_level_clamped() {
        assert_eq!(xp_in_current_level(0, 1), 0);
        assert_eq!(xp_in_current_level(250, 2), 10);
        // Stored level ahead of xp never goes negative
        assert_eq!(xp_in_current_level(100, 3), 0);
    }
}
