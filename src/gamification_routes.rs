// ABOUTME: REST routes for the reward engine, read projections, and exercise logging
// ABOUTME: Award endpoints mutate gamification state; the rest are pure reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gamification routes
//!
//! The two award endpoints invoke the reward engine. Exercise log recording
//! is a separate endpoint on the workout-mutation path so PR detection only
//! ever reads committed history. Read endpoints project zero defaults for
//! users with no profile yet.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::gamification::{ExerciseRewardSummary, WorkoutRewardSummary};
use crate::models::{ExerciseLog, GameProfileView};
use crate::resources::ServerResources;

/// Request body for the exercise-completion reward
#[derive(Debug, Deserialize)]
pub struct ExerciseRewardRequest {
    /// User the reward applies to
    pub user_id: Uuid,
    /// Exercise that was completed
    pub exercise_name: String,
    /// Weight used in kilograms
    pub weight_used: f64,
    /// Whether perceived exertion was recorded
    pub had_rpe: bool,
}

/// Request body for the workout-completion reward
#[derive(Debug, Deserialize)]
pub struct WorkoutRewardRequest {
    /// User the reward applies to
    pub user_id: Uuid,
    /// ISO date (YYYY-MM-DD) the workout was completed
    pub date: String,
    /// Optional pre-aggregated weekly lifted volume
    pub weekly_volume: Option<f64>,
}

/// Request body for recording a completed exercise performance
#[derive(Debug, Deserialize)]
pub struct RecordExerciseLogRequest {
    /// Owning user
    pub user_id: Uuid,
    /// Workout the performance belongs to
    pub workout_id: Uuid,
    /// Exercise name
    pub exercise_name: String,
    /// ISO date (YYYY-MM-DD) of the performance
    pub date: String,
    /// Sets completed
    pub sets_completed: i32,
    /// Reps completed per set
    pub reps_completed: i32,
    /// Weight used in kilograms
    pub weight_used: f64,
    /// Rate of perceived exertion, if logged
    pub rpe: Option<f64>,
}

/// Response for a recorded exercise log
#[derive(Debug, Serialize)]
pub struct RecordExerciseLogResponse {
    /// Identifier of the new log row
    pub id: Uuid,
}

/// One unlocked achievement decorated with catalog metadata
#[derive(Debug, Serialize)]
pub struct AchievementResponse {
    /// Stable achievement identifier
    pub achievement_id: String,
    /// When it was unlocked
    pub unlocked_at: String,
    /// Display title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Lucide icon name
    pub icon: &'static str,
    /// Rarity tier
    pub rarity: crate::achievements::Rarity,
    /// Coins the UI shows alongside the unlock toast
    pub coin_bonus: i64,
}

/// Date range for the weekly volume aggregation
#[derive(Debug, Deserialize)]
pub struct WeeklyVolumeQuery {
    /// Inclusive range start (YYYY-MM-DD)
    pub start: String,
    /// Inclusive range end (YYYY-MM-DD)
    pub end: String,
}

/// Aggregated lifted volume over a date range
#[derive(Debug, Serialize)]
pub struct WeeklyVolumeResponse {
    /// Total weight x reps x sets over the range
    pub weekly_volume: f64,
}

/// Formatted profile text for prompt-construction callers
#[derive(Debug, Serialize)]
pub struct ProfileSummaryResponse {
    /// Human-readable one-line summary
    pub summary: String,
}

/// Gamification routes implementation
pub struct GamificationRoutes;

impl GamificationRoutes {
    /// Create all gamification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/gamification/rewards/exercise",
                post(Self::handle_exercise_reward),
            )
            .route(
                "/api/gamification/rewards/workout",
                post(Self::handle_workout_reward),
            )
            .route("/api/exercise-logs", post(Self::handle_record_exercise_log))
            .route(
                "/api/gamification/profile/:user_id",
                get(Self::handle_get_profile),
            )
            .route(
                "/api/gamification/achievements/:user_id",
                get(Self::handle_get_achievements),
            )
            .route(
                "/api/gamification/weekly-volume/:user_id",
                get(Self::handle_weekly_volume),
            )
            .route(
                "/api/gamification/profile-summary/:user_id",
                get(Self::handle_profile_summary),
            )
            .with_state(resources)
    }

    fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw)
            .map_err(|_| AppError::invalid_input(format!("Invalid user ID: {raw}")))
    }

    fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_format(format!("Invalid ISO date: {raw}")))
    }

    /// Handle POST /api/gamification/rewards/exercise
    async fn handle_exercise_reward(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<ExerciseRewardRequest>,
    ) -> Result<Response, AppError> {
        let summary: ExerciseRewardSummary = resources
            .engine
            .award_exercise_complete(
                body.user_id,
                &body.exercise_name,
                body.weight_used,
                body.had_rpe,
            )
            .await?;

        // Rewards changed the profile; the cached summary text is now stale
        resources.profile_summary_cache.invalidate(body.user_id).await;

        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle POST /api/gamification/rewards/workout
    async fn handle_workout_reward(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<WorkoutRewardRequest>,
    ) -> Result<Response, AppError> {
        let date = Self::parse_date(&body.date)?;
        if body.weekly_volume.is_some_and(|v| v < 0.0) {
            return Err(AppError::invalid_input("weekly_volume must be >= 0"));
        }

        let summary: WorkoutRewardSummary = resources
            .engine
            .award_workout_complete(body.user_id, date, body.weekly_volume)
            .await?;

        resources.profile_summary_cache.invalidate(body.user_id).await;

        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle POST /api/exercise-logs
    ///
    /// The workout-mutation path records the performance row itself; the
    /// reward engine never writes logs, so callers invoke this first and the
    /// exercise reward second.
    async fn handle_record_exercise_log(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RecordExerciseLogRequest>,
    ) -> Result<Response, AppError> {
        if body.exercise_name.trim().is_empty() {
            return Err(AppError::invalid_input("exercise_name must not be empty"));
        }
        if body.sets_completed <= 0 || body.reps_completed <= 0 {
            return Err(AppError::invalid_input(
                "sets_completed and reps_completed must be positive",
            ));
        }
        if body.weight_used < 0.0 {
            return Err(AppError::invalid_input("weight_used must be >= 0"));
        }

        let log = ExerciseLog {
            id: Uuid::new_v4(),
            user_id: body.user_id,
            workout_id: body.workout_id,
            exercise_name: body.exercise_name,
            date: Self::parse_date(&body.date)?,
            sets_completed: body.sets_completed,
            reps_completed: body.reps_completed,
            weight_used: body.weight_used,
            rpe: body.rpe,
        };
        resources.database.insert_exercise_log(&log).await?;

        Ok((
            StatusCode::CREATED,
            Json(RecordExerciseLogResponse { id: log.id }),
        )
            .into_response())
    }

    /// Handle GET /api/gamification/profile/{user_id}
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = Self::parse_user_id(&user_id)?;
        let view: GameProfileView = resources.engine.game_profile_view(user_id).await?;
        Ok((StatusCode::OK, Json(view)).into_response())
    }

    /// Handle GET /api/gamification/achievements/{user_id}
    async fn handle_get_achievements(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = Self::parse_user_id(&user_id)?;
        let achievements = resources.database.get_achievements(user_id).await?;

        let response: Vec<AchievementResponse> = achievements
            .into_iter()
            .map(|a| {
                let def = a.achievement_id.def();
                AchievementResponse {
                    achievement_id: a.achievement_id.to_string(),
                    unlocked_at: a.unlocked_at.to_rfc3339(),
                    title: def.title,
                    description: def.description,
                    icon: def.icon,
                    rarity: def.rarity,
                    coin_bonus: def.coin_bonus,
                }
            })
            .collect();

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/gamification/weekly-volume/{user_id}?start=..&end=..
    async fn handle_weekly_volume(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(query): Query<WeeklyVolumeQuery>,
    ) -> Result<Response, AppError> {
        let user_id = Self::parse_user_id(&user_id)?;
        let start = Self::parse_date(&query.start)?;
        let end = Self::parse_date(&query.end)?;
        if start > end {
            return Err(AppError::invalid_input("start must not be after end"));
        }

        let weekly_volume = resources.database.weekly_volume(user_id, start, end).await?;
        Ok((StatusCode::OK, Json(WeeklyVolumeResponse { weekly_volume })).into_response())
    }

    /// Handle GET /api/gamification/profile-summary/{user_id}
    ///
    /// Serves the TTL-cached formatted summary used for AI prompt
    /// construction. Staleness within the TTL is tolerated by design.
    async fn handle_profile_summary(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = Self::parse_user_id(&user_id)?;

        if let Some(summary) = resources.profile_summary_cache.get(user_id).await {
            return Ok((StatusCode::OK, Json(ProfileSummaryResponse { summary })).into_response());
        }

        let view = resources.engine.game_profile_view(user_id).await?;
        let achievements = resources.database.get_achievements(user_id).await?;
        let summary = format_profile_summary(&view, achievements.len());
        resources
            .profile_summary_cache
            .insert(user_id, summary.clone())
            .await;

        Ok((StatusCode::OK, Json(ProfileSummaryResponse { summary })).into_response())
    }
}

/// Render the one-line profile summary text
fn format_profile_summary(view: &GameProfileView, achievement_count: usize) -> String {
    let p = &view.profile;
    format!(
        "Level {} {} | {} XP ({}/{} into current level) | {} coins | \
         {}-day streak (best {}) | {} workouts, {} exercises, {} PRs | \
         {} achievements unlocked",
        p.level,
        view.title,
        p.xp,
        view.xp_in_current_level,
        view.xp_to_next_level,
        p.coins,
        p.current_streak,
        p.longest_streak,
        p.total_workouts,
        p.total_exercises,
        p.personal_records,
        achievement_count,
    )
}
