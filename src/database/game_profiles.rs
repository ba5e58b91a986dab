// ABOUTME: Game profile persistence: lazy creation, reads, and transactional patches
// ABOUTME: Transaction-scoped operations take a connection so award calls stay atomic
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::GameProfile;

fn row_to_profile(row: &SqliteRow) -> AppResult<GameProfile> {
    let user_id: String = row.get("user_id");
    let last_active_date: Option<String> = row.get("last_active_date");
    Ok(GameProfile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::database(format!("Corrupt user_id in game_profiles: {e}")))?,
        coins: row.get("coins"),
        xp: row.get("xp"),
        level: row.get("level"),
        current_streak: row.get("current_streak"),
        longest_streak: row.get("longest_streak"),
        total_workouts: row.get("total_workouts"),
        total_exercises: row.get("total_exercises"),
        personal_records: row.get("personal_records"),
        last_active_date: last_active_date
            .map(|d| {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|e| {
                    AppError::database(format!("Corrupt last_active_date in game_profiles: {e}"))
                })
            })
            .transpose()?,
    })
}

impl Database {
    /// Create the game profiles table
    pub(super) async fn migrate_game_profiles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS game_profiles (
                user_id TEXT PRIMARY KEY,
                coins INTEGER NOT NULL DEFAULT 0 CHECK (coins >= 0),
                xp INTEGER NOT NULL DEFAULT 0 CHECK (xp >= 0),
                level INTEGER NOT NULL DEFAULT 1 CHECK (level >= 1),
                current_streak INTEGER NOT NULL DEFAULT 0 CHECK (current_streak >= 0),
                longest_streak INTEGER NOT NULL DEFAULT 0 CHECK (longest_streak >= 0),
                total_workouts INTEGER NOT NULL DEFAULT 0,
                total_exercises INTEGER NOT NULL DEFAULT 0,
                personal_records INTEGER NOT NULL DEFAULT 0,
                last_active_date TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a user's game profile, if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn get_game_profile(&self, user_id: Uuid) -> AppResult<Option<GameProfile>> {
        let row = sqlx::query("SELECT * FROM game_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Transaction-scoped profile read
    pub(crate) async fn get_game_profile_tx(
        conn: &mut SqliteConnection,
        user_id: Uuid,
    ) -> AppResult<Option<GameProfile>> {
        let row = sqlx::query("SELECT * FROM game_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(conn)
            .await?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Get-or-create a user's game profile inside a transaction
    ///
    /// Idempotent: the first reward event for a user creates the row with
    /// zero defaults, every later call returns the existing row.
    pub(crate) async fn ensure_game_profile(
        conn: &mut SqliteConnection,
        user_id: Uuid,
    ) -> AppResult<GameProfile> {
        if let Some(existing) = Self::get_game_profile_tx(conn, user_id).await? {
            return Ok(existing);
        }

        sqlx::query(
            r"
            INSERT INTO game_profiles (
                user_id, coins, xp, level, current_streak, longest_streak,
                total_workouts, total_exercises, personal_records, last_active_date
            )
            VALUES (?, 0, 0, 1, 0, 0, 0, 0, 0, NULL)
            ",
        )
        .bind(user_id.to_string())
        .execute(conn)
        .await?;

        Ok(GameProfile::new(user_id))
    }

    /// Write back every mutable profile column inside a transaction
    pub(crate) async fn patch_game_profile(
        conn: &mut SqliteConnection,
        profile: &GameProfile,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE game_profiles SET
                coins = ?,
                xp = ?,
                level = ?,
                current_streak = ?,
                longest_streak = ?,
                total_workouts = ?,
                total_exercises = ?,
                personal_records = ?,
                last_active_date = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = ?
            ",
        )
        .bind(profile.coins)
        .bind(profile.xp)
        .bind(profile.level)
        .bind(profile.current_streak)
        .bind(profile.longest_streak)
        .bind(profile.total_workouts)
        .bind(profile.total_exercises)
        .bind(profile.personal_records)
        .bind(profile.last_active_date.map(|d| d.to_string()))
        .bind(profile.user_id.to_string())
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(
                AppError::not_found(format!("GameProfile for user {}", profile.user_id))
                    .with_user_id(profile.user_id),
            );
        }

        Ok(())
    }
}
