// ABOUTME: Main library entry point for the IronQuest gamification backend
// ABOUTME: Exposes the reward engine, persistence layer, and REST API surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # IronQuest Server
//!
//! The reward and progression backend of a gamified personal fitness
//! coaching application. Users complete AI-generated workouts; this service
//! converts completion events into coins, XP, levels, streaks, and
//! achievement unlocks with per-user transactional guarantees.
//!
//! ## Architecture
//!
//! - **Progression**: pure XP/level curve math and display titles
//! - **Rewards**: the static coin/XP table per event type
//! - **Achievements**: the closed identifier set and display catalog
//! - **Gamification**: the engine applying reward rules transactionally
//! - **Database**: SQLite-backed store for profiles, achievements, and logs
//! - **Routes**: REST endpoints for awards, projections, and exercise logs
//!
//! ## Example
//!
//! ```rust,no_run
//! use ironquest_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("IronQuest server configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Achievement identifiers and display catalog
pub mod achievements;
/// TTL cache for formatted profile summaries
pub mod cache;
/// Environment-based configuration
pub mod config;
/// Database management and per-aggregate persistence
pub mod database;
/// Unified error handling
pub mod errors;
/// Reward & progression engine
pub mod gamification;
/// REST routes for the gamification API
pub mod gamification_routes;
/// Health check routes
pub mod health;
/// Structured logging setup
pub mod logging;
/// Core data models
pub mod models;
/// Pure progression math
pub mod progression;
/// Shared server resources
pub mod resources;
/// Static reward table
pub mod rewards;
/// HTTP server assembly
pub mod server;
