// ABOUTME: Append-only exercise log persistence and the PR-detection history query
// ABOUTME: Also aggregates lifted volume over a date range for achievement evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqliteConnection;
use uuid::Uuid;

use super::Database;
use crate::errors::AppResult;
use crate::models::ExerciseLog;

/// Committed history for one (user, exercise) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseHistory {
    /// Number of prior logs
    pub prior_logs: i64,
    /// Maximum weight across prior logs, 0 when none exist
    pub max_weight: f64,
}

impl Database {
    /// Create the exercise logs table and its indexes
    pub(super) async fn migrate_exercise_logs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                workout_id TEXT NOT NULL,
                exercise_name TEXT NOT NULL,
                date TEXT NOT NULL,
                sets_completed INTEGER NOT NULL CHECK (sets_completed > 0),
                reps_completed INTEGER NOT NULL CHECK (reps_completed > 0),
                weight_used REAL NOT NULL CHECK (weight_used >= 0),
                rpe REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_logs_user_exercise
             ON exercise_logs(user_id, exercise_name)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_logs_user_date
             ON exercise_logs(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one completed exercise performance
    ///
    /// Rows are never mutated or deleted; this is the only write path.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including CHECK violations for
    /// non-positive sets/reps or negative weight).
    pub async fn insert_exercise_log(&self, log: &ExerciseLog) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercise_logs (
                id, user_id, workout_id, exercise_name, date,
                sets_completed, reps_completed, weight_used, rpe
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(log.id.to_string())
        .bind(log.user_id.to_string())
        .bind(log.workout_id.to_string())
        .bind(&log.exercise_name)
        .bind(log.date.to_string())
        .bind(log.sets_completed)
        .bind(log.reps_completed)
        .bind(log.weight_used)
        .bind(log.rpe)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Transaction-scoped history read for PR detection
    ///
    /// Reads only committed rows: the log for the exercise being rewarded is
    /// written by the workout mutation path, never by the reward engine, so
    /// it can never count against itself here.
    pub(crate) async fn exercise_history_tx(
        conn: &mut SqliteConnection,
        user_id: Uuid,
        exercise_name: &str,
    ) -> AppResult<ExerciseHistory> {
        let (prior_logs, max_weight): (i64, Option<f64>) = sqlx::query_as(
            r"
            SELECT COUNT(*), MAX(weight_used)
            FROM exercise_logs
            WHERE user_id = ? AND exercise_name = ?
            ",
        )
        .bind(user_id.to_string())
        .bind(exercise_name)
        .fetch_one(conn)
        .await?;

        Ok(ExerciseHistory {
            prior_logs,
            max_weight: max_weight.unwrap_or(0.0),
        })
    }

    /// Total lifted volume (weight x reps x sets) over an inclusive date range
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn weekly_volume(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<f64> {
        let (volume,): (Option<f64>,) = sqlx::query_as(
            r"
            SELECT SUM(weight_used * reps_completed * sets_completed)
            FROM exercise_logs
            WHERE user_id = ? AND date >= ? AND date <= ?
            ",
        )
        .bind(user_id.to_string())
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(volume.unwrap_or(0.0))
    }
}
