// ABOUTME: Environment-based server configuration with sensible defaults
// ABOUTME: HTTP port, database URL, and log level; everything overridable via env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment configuration
//!
//! All settings come from environment variables with defaults suitable for
//! local development:
//!
//! - `HTTP_PORT` (default 8081)
//! - `DATABASE_URL` (default `sqlite:./data/ironquest.db`)
//! - `RUST_LOG` (default `info`)

use std::env;

use anyhow::{Context, Result};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP API
    pub http_port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Database settings
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or("HTTP_PORT", "8081")
            .parse::<u16>()
            .context("HTTP_PORT must be a valid port number")?;

        let config = Self {
            http_port,
            log_level: env_var_or("RUST_LOG", "info"),
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", "sqlite:./data/ironquest.db"),
            },
        };

        Ok(config)
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "IronQuest Server Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Database: {}",
            self.http_port,
            self.log_level,
            if self.database.url.starts_with("sqlite:") {
                "SQLite"
            } else {
                "unknown"
            },
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        env::remove_var("HTTP_PORT");
        env::remove_var("DATABASE_URL");
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, 8081);
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    #[serial]
    fn test_invalid_port_rejected() {
        env::set_var("HTTP_PORT", "not-a-port");
        let result = ServerConfig::from_env();
        env::remove_var("HTTP_PORT");
        assert!(result.is_err());
    }
}
