// ABOUTME: Database management for the reward engine's persistent aggregates
// ABOUTME: Owns the SQLite pool, schema migration, and per-aggregate submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! A thin transactional store over `sqlx`/SQLite. Each aggregate lives in its
//! own submodule; operations that participate in a reward transaction take a
//! `&mut SqliteConnection` so the engine can run read-compute-patch as one
//! unit. Schema creation is idempotent and runs at startup.

mod achievements;
mod exercise_logs;
mod game_profiles;
pub mod transactions;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for gamification state
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema
    /// migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_game_profiles().await?;
        self.migrate_achievements().await?;
        self.migrate_exercise_logs().await?;
        Ok(())
    }
}
