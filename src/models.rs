// ABOUTME: Core data models for the reward and progression engine
// ABOUTME: Defines GameProfile, Achievement, ExerciseLog and their display projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Persistent aggregates owned by the reward engine. All three are keyed by
//! `user_id` but are otherwise independent: no cross-entity cascades. The
//! profile is lazily created with zero defaults; achievements and exercise
//! logs are append-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::AchievementId;
use crate::progression;

/// Per-user gamification aggregate, created on the first reward event
///
/// `level` is cached but must always equal `level_for_xp(xp)` after a write.
/// Every counter is non-negative and, in this system, non-decreasing
/// (no coin spending is modeled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProfile {
    /// Owning user; immutable foreign reference
    pub user_id: Uuid,
    /// Lifetime coins earned
    pub coins: i64,
    /// Lifetime XP earned
    pub xp: i64,
    /// Cached level, always `level_for_xp(xp)`
    pub level: i32,
    /// Consecutive calendar days with at least one completed workout
    pub current_streak: i32,
    /// Historical maximum of `current_streak`
    pub longest_streak: i32,
    /// Lifetime workout-completion events
    pub total_workouts: i64,
    /// Lifetime exercise-completion events
    pub total_exercises: i64,
    /// Lifetime detected personal records
    pub personal_records: i64,
    /// Date of the most recent workout completion
    pub last_active_date: Option<NaiveDate>,
}

impl GameProfile {
    /// Zeroed profile for a user who has not earned anything yet
    #[must_use]
    pub const fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            coins: 0,
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            total_workouts: 0,
            total_exercises: 0,
            personal_records: 0,
            last_active_date: None,
        }
    }
}

/// Unlocked achievement row; (`user_id`, `achievement_id`) is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Owning user
    pub user_id: Uuid,
    /// Which achievement was unlocked
    pub achievement_id: AchievementId,
    /// When it was unlocked
    pub unlocked_at: DateTime<Utc>,
}

/// One completed exercise performance; append-only
///
/// Rows are the source of truth for personal-record detection: an exercise's
/// prior maximum `weight_used` is computed from committed history only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Row identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Workout this performance belongs to
    pub workout_id: Uuid,
    /// Exercise name as shown in the workout plan
    pub exercise_name: String,
    /// Calendar date of the performance
    pub date: NaiveDate,
    /// Sets completed
    pub sets_completed: i32,
    /// Reps completed per set
    pub reps_completed: i32,
    /// Weight used in kilograms
    pub weight_used: f64,
    /// Rate of perceived exertion, when the user logged it
    pub rpe: Option<f64>,
}

/// Display projection of a profile with derived progression fields
///
/// A user with no profile row projects as level 1 with zero counters rather
/// than an error.
#[derive(Debug, Clone, Serialize)]
pub struct GameProfileView {
    /// The underlying profile (zero defaults when none exists yet)
    #[serde(flatten)]
    pub profile: GameProfile,
    /// Display title for the current level
    pub title: &'static str,
    /// Incremental XP cost of the next level
    pub xp_to_next_level: i64,
    /// XP earned within the current level, clamped to zero
    pub xp_in_current_level: i64,
}

impl GameProfileView {
    /// Build the display projection for a profile
    #[must_use]
    pub fn from_profile(profile: GameProfile) -> Self {
        let title = progression::title_for_level(profile.level);
        let xp_to_next_level = progression::xp_for_level(profile.level + 1);
        let xp_in_current_level = progression::xp_in_current_level(profile.xp, profile.level);
        Self {
            profile,
            title,
            xp_to_next_level,
            xp_in_current_level,
        }
    }

    /// Projection for a user with no profile row yet
    #[must_use]
    pub fn default_for(user_id: Uuid) -> Self {
        Self::from_profile(GameProfile::new(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = GameProfile::new(Uuid::new_v4());
        assert_eq!(profile.coins, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.current_streak, 0);
        assert!(profile.last_active_date.is_none());
    }

    #[test]
    fn test_default_view_projects_level_one() {
        let view = GameProfileView::default_for(Uuid::new_v4());
        assert_eq!(view.profile.level, 1);
        assert_eq!(view.title, "Beginner Lifter");
        assert_eq!(view.xp_to_next_level, 240);
        assert_eq!(view.xp_in_current_level, 0);
    }
}
