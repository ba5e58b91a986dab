// ABOUTME: Reward and progression engine: exercise/workout award orchestration
// ABOUTME: Streak state machine, PR detection, and achievement unlock predicates
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Reward & Progression Engine
//!
//! The two award operations each run as one transaction per user: read the
//! profile, compute deltas, write the patch. Achievement unlocks happen after
//! the profile commit and are best-effort; a failed unlock is logged and
//! omitted, never failing the call. The engine never writes exercise logs
//! itself, so PR detection only ever sees committed history.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::achievements::AchievementId;
use crate::database::transactions::{retry_transaction, DEFAULT_MAX_RETRIES};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{GameProfile, GameProfileView};
use crate::progression::level_for_xp;
use crate::rewards::RewardEvent;

/// Weekly lifted volume (kg) that unlocks `iron_century`
const IRON_CENTURY_VOLUME: f64 = 10_000.0;

/// Result summary for an exercise-completion reward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRewardSummary {
    /// Coins granted by this event
    pub coins_earned: i64,
    /// XP granted by this event
    pub xp_earned: i64,
    /// Whether this completion set a new personal record
    pub is_pr: bool,
    /// Whether the user's level increased
    pub leveled_up: bool,
    /// Level after this event
    pub new_level: i32,
    /// Achievements newly unlocked by this event
    pub new_achievements: Vec<AchievementId>,
    /// Lifetime coins after this event
    pub total_coins: i64,
}

/// Result summary for a workout-completion reward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRewardSummary {
    /// Coins granted by this event
    pub coins_earned: i64,
    /// XP granted by this event
    pub xp_earned: i64,
    /// Whether the user's level increased
    pub leveled_up: bool,
    /// Level after this event
    pub new_level: i32,
    /// Streak after the state machine ran
    pub new_streak: i32,
    /// Achievements newly unlocked by this event
    pub new_achievements: Vec<AchievementId>,
    /// Lifetime coins after this event
    pub total_coins: i64,
    /// Lifetime XP after this event
    pub total_xp: i64,
}

/// Outcome of the transactional phase of an award call
struct AwardOutcome {
    level_before: i32,
    profile: GameProfile,
    coins_earned: i64,
    xp_earned: i64,
    is_pr: bool,
}

/// Reward & progression engine over the transactional store
#[derive(Clone)]
pub struct GamificationEngine {
    db: Database,
}

impl GamificationEngine {
    /// Create an engine over the given database
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Award coins and XP for a completed exercise
    ///
    /// Grants the base exercise reward, the RPE bonus when exertion data was
    /// logged, and the PR bonus when `weight_used` strictly beats the prior
    /// maximum for this exercise (a first-ever log is never a PR).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty exercise name or negative weight,
    /// or a database error once transaction retries are exhausted.
    pub async fn award_exercise_complete(
        &self,
        user_id: Uuid,
        exercise_name: &str,
        weight_used: f64,
        had_rpe: bool,
    ) -> AppResult<ExerciseRewardSummary> {
        if exercise_name.trim().is_empty() {
            return Err(AppError::invalid_input("exercise_name must not be empty")
                .with_user_id(user_id));
        }
        if weight_used < 0.0 {
            return Err(
                AppError::invalid_input("weight_used must be >= 0").with_user_id(user_id)
            );
        }

        let outcome = retry_transaction(
            || self.apply_exercise_reward(user_id, exercise_name, weight_used, had_rpe),
            DEFAULT_MAX_RETRIES,
        )
        .await?;

        let mut candidates = Vec::new();
        if outcome.profile.total_exercises == 1 {
            candidates.push(AchievementId::FirstBlood);
        }
        if outcome.profile.personal_records >= 5 {
            candidates.push(AchievementId::PrMachine);
        }
        if outcome.profile.coins >= 1000 {
            candidates.push(AchievementId::CoinCollector);
        }
        if outcome.profile.level >= 10 {
            candidates.push(AchievementId::Level10);
        }
        let new_achievements = self.unlock_candidates(user_id, &candidates).await;

        info!(
            %user_id,
            coins_earned = outcome.coins_earned,
            xp_earned = outcome.xp_earned,
            is_pr = outcome.is_pr,
            new_level = outcome.profile.level,
            "exercise reward applied"
        );

        Ok(ExerciseRewardSummary {
            coins_earned: outcome.coins_earned,
            xp_earned: outcome.xp_earned,
            is_pr: outcome.is_pr,
            leveled_up: outcome.profile.level > outcome.level_before,
            new_level: outcome.profile.level,
            new_achievements,
            total_coins: outcome.profile.coins,
        })
    }

    /// Award the workout-completion bonus and advance the streak machine
    ///
    /// `date` is the caller-supplied completion day, not necessarily today.
    /// `weekly_volume` is an optional pre-aggregated lifted-weight figure;
    /// the `iron_century` predicate is only evaluated when it is supplied.
    ///
    /// # Errors
    ///
    /// Returns a database error once transaction retries are exhausted.
    pub async fn award_workout_complete(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        weekly_volume: Option<f64>,
    ) -> AppResult<WorkoutRewardSummary> {
        let (outcome, new_streak) = retry_transaction(
            || self.apply_workout_reward(user_id, date),
            DEFAULT_MAX_RETRIES,
        )
        .await?;

        let mut candidates = Vec::new();
        if outcome.profile.total_workouts == 1 {
            candidates.push(AchievementId::FullSend);
        }
        if new_streak >= 7 {
            candidates.push(AchievementId::StreakMaster);
        }
        if new_streak >= 30 {
            candidates.push(AchievementId::ConsistencyKing);
        }
        if weekly_volume.is_some_and(|v| v >= IRON_CENTURY_VOLUME) {
            candidates.push(AchievementId::IronCentury);
        }
        let new_achievements = self.unlock_candidates(user_id, &candidates).await;

        info!(
            %user_id,
            %date,
            coins_earned = outcome.coins_earned,
            xp_earned = outcome.xp_earned,
            new_streak = new_streak,
            new_level = outcome.profile.level,
            "workout reward applied"
        );

        Ok(WorkoutRewardSummary {
            coins_earned: outcome.coins_earned,
            xp_earned: outcome.xp_earned,
            leveled_up: outcome.profile.level > outcome.level_before,
            new_level: outcome.profile.level,
            new_streak,
            new_achievements,
            total_coins: outcome.profile.coins,
            total_xp: outcome.profile.xp,
        })
    }

    /// Display projection of a user's profile; zero defaults when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn game_profile_view(&self, user_id: Uuid) -> AppResult<GameProfileView> {
        Ok(self
            .db
            .get_game_profile(user_id)
            .await?
            .map_or_else(|| GameProfileView::default_for(user_id), GameProfileView::from_profile))
    }

    /// Transactional phase of the exercise award
    async fn apply_exercise_reward(
        &self,
        user_id: Uuid,
        exercise_name: &str,
        weight_used: f64,
        had_rpe: bool,
    ) -> AppResult<AwardOutcome> {
        let mut tx = self.db.pool().begin().await?;

        let before = Database::ensure_game_profile(&mut tx, user_id).await?;

        let base = RewardEvent::ExerciseComplete.reward();
        let mut coins_earned = base.coins;
        let mut xp_earned = base.xp;

        if had_rpe {
            let bonus = RewardEvent::RpeLogged.reward();
            coins_earned += bonus.coins;
            xp_earned += bonus.xp;
        }

        let history =
            Database::exercise_history_tx(&mut tx, user_id, exercise_name).await?;
        let is_pr =
            weight_used > history.max_weight && weight_used > 0.0 && history.prior_logs > 0;
        if is_pr {
            let bonus = RewardEvent::PersonalRecord.reward();
            coins_earned += bonus.coins;
            xp_earned += bonus.xp;
        }

        let mut profile = before.clone();
        profile.coins += coins_earned;
        profile.xp += xp_earned;
        profile.level = level_for_xp(profile.xp);
        profile.total_exercises += 1;
        profile.personal_records += i64::from(is_pr);

        Database::patch_game_profile(&mut tx, &profile).await?;
        tx.commit().await?;

        Ok(AwardOutcome {
            level_before: before.level,
            profile,
            coins_earned,
            xp_earned,
            is_pr,
        })
    }

    /// Transactional phase of the workout award
    async fn apply_workout_reward(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<(AwardOutcome, i32)> {
        let mut tx = self.db.pool().begin().await?;

        let before = Database::ensure_game_profile(&mut tx, user_id).await?;

        let base = RewardEvent::WorkoutComplete.reward();
        let mut coins_earned = base.coins;
        let mut xp_earned = base.xp;

        let new_streak = next_streak(before.last_active_date, before.current_streak, date);

        // Milestone bonuses fire only on the transition into the threshold;
        // the pre-update streak guards against re-awarding on hold days.
        if new_streak == 3 && before.current_streak < 3 {
            let bonus = RewardEvent::Streak3.reward();
            coins_earned += bonus.coins;
            xp_earned += bonus.xp;
        }
        if new_streak == 7 && before.current_streak < 7 {
            let bonus = RewardEvent::Streak7.reward();
            coins_earned += bonus.coins;
            xp_earned += bonus.xp;
        }

        let monday = week_start_monday(date);
        if before.last_active_date.is_none_or(|last| last < monday) {
            let bonus = RewardEvent::FirstWorkoutOfWeek.reward();
            coins_earned += bonus.coins;
            xp_earned += bonus.xp;
        }

        let mut profile = before.clone();
        profile.coins += coins_earned;
        profile.xp += xp_earned;
        profile.level = level_for_xp(profile.xp);
        profile.current_streak = new_streak;
        profile.longest_streak = profile.longest_streak.max(new_streak);
        profile.total_workouts += 1;
        profile.last_active_date = Some(date);

        Database::patch_game_profile(&mut tx, &profile).await?;
        tx.commit().await?;

        Ok((
            AwardOutcome {
                level_before: before.level,
                profile,
                coins_earned,
                xp_earned,
                is_pr: false,
            },
            new_streak,
        ))
    }

    /// Insert-if-absent for every candidate; failures are logged and skipped
    ///
    /// Achievements are enrichment layered over the authoritative counters;
    /// the profile patch has already committed by the time this runs and is
    /// never rolled back for a failed unlock.
    async fn unlock_candidates(
        &self,
        user_id: Uuid,
        candidates: &[AchievementId],
    ) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        for &candidate in candidates {
            match self.db.unlock_achievement(user_id, candidate).await {
                Ok(true) => unlocked.push(candidate),
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        %user_id,
                        achievement = candidate.as_str(),
                        error = %e,
                        "achievement unlock failed, continuing"
                    );
                }
            }
        }
        unlocked
    }
}

/// Streak continuation state machine
///
/// `None` last-active means a first-ever workout (streak 1). A one-day gap
/// continues the streak, the same day leaves it unchanged, and anything else
/// resets to 1. Past-dated backfills have a negative day diff and fall
/// through to the reset arm.
fn next_streak(last_active: Option<NaiveDate>, current_streak: i32, date: NaiveDate) -> i32 {
    last_active.map_or(1, |last| {
        let diff_days = (date - last).num_days();
        if diff_days == 1 {
            current_streak + 1
        } else if diff_days == 0 {
            current_streak
        } else {
            1
        }
    })
}

/// Monday of the ISO week containing `date`
fn week_start_monday(date: NaiveDate) -> NaiveDate {
    let days_from_monday = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_streak_first_workout() {
        assert_eq!(next_streak(None, 0, d("2024-01-01")), 1);
    }

    #[test]
    fn test_streak_continuation() {
        assert_eq!(next_streak(Some(d("2024-01-01")), 4, d("2024-01-02")), 5);
    }

    #[test]
    fn test_streak_same_day_unchanged() {
        assert_eq!(next_streak(Some(d("2024-01-01")), 4, d("2024-01-01")), 4);
    }

    #[test]
    fn test_streak_gap_resets() {
        assert_eq!(next_streak(Some(d("2024-01-01")), 4, d("2024-01-05")), 1);
    }

    #[test]
    fn test_streak_past_dated_backfill_resets() {
        // A backfilled workout dated before the last active day resets the
        // streak; the machine only compares against last_active_date.
        assert_eq!(next_streak(Some(d("2024-01-10")), 6, d("2024-01-08")), 1);
    }

    #[test]
    fn test_week_start_monday() {
        assert_eq!(week_start_monday(d("2024-03-06")), d("2024-03-04")); // Wed
        assert_eq!(week_start_monday(d("2024-03-04")), d("2024-03-04")); // Mon
        assert_eq!(week_start_monday(d("2024-03-10")), d("2024-03-04")); // Sun
    }
}
