// ABOUTME: Shared server resources passed to every route handler as axum state
// ABOUTME: Owns the database handle, reward engine, cache, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared server resources

use crate::cache::ProfileSummaryCache;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::gamification::GamificationEngine;

/// Long-lived resources shared by all request handlers
///
/// Constructed once at startup and passed around behind an `Arc`.
pub struct ServerResources {
    /// Transactional store for gamification state
    pub database: Database,
    /// Reward & progression engine
    pub engine: GamificationEngine,
    /// TTL cache of formatted profile summaries
    pub profile_summary_cache: ProfileSummaryCache,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the shared resources for the HTTP layer
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let engine = GamificationEngine::new(database.clone());
        Self {
            database,
            engine,
            profile_summary_cache: ProfileSummaryCache::new(),
            config,
        }
    }
}
