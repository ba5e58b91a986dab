// ABOUTME: Achievement ledger persistence with idempotent insert-if-absent unlocks
// ABOUTME: Uniqueness on (user_id, achievement_id) guarantees at-most-once per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Database;
use crate::achievements::AchievementId;
use crate::errors::{AppError, AppResult};
use crate::models::Achievement;

impl Database {
    /// Create the achievements table
    pub(super) async fn migrate_achievements(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                achievement_id TEXT NOT NULL,
                unlocked_at DATETIME NOT NULL,
                UNIQUE (user_id, achievement_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_achievements_user ON achievements(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Unlock an achievement if the user does not already hold it
    ///
    /// Returns `true` when a new row was inserted. The UNIQUE constraint
    /// makes concurrent duplicate unlocks collapse to a single row, so the
    /// call is idempotent and safe to re-evaluate on every reward event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for any reason other than the
    /// row already existing.
    pub async fn unlock_achievement(
        &self,
        user_id: Uuid,
        achievement_id: AchievementId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO achievements (id, user_id, achievement_id, unlocked_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(achievement_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List every achievement a user has unlocked, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored identifier is not in
    /// the closed achievement set.
    pub async fn get_achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT achievement_id, unlocked_at
            FROM achievements
            WHERE user_id = ?
            ORDER BY unlocked_at ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, unlocked_at)| {
                Ok(Achievement {
                    user_id,
                    achievement_id: id.parse().map_err(|_| {
                        AppError::database(format!("Unknown achievement_id in ledger: {id}"))
                    })?,
                    unlocked_at,
                })
            })
            .collect()
    }

    /// Whether the user already holds the given achievement
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn has_achievement(
        &self,
        user_id: Uuid,
        achievement_id: AchievementId,
    ) -> AppResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM achievements WHERE user_id = ? AND achievement_id = ?",
        )
        .bind(user_id.to_string())
        .bind(achievement_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }
}
