// ABOUTME: Server binary for the IronQuest gamification backend
// ABOUTME: Loads configuration, initializes logging and the database, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # IronQuest Server Binary
//!
//! Starts the reward/progression REST API with environment-based
//! configuration and a SQLite-backed store.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ironquest_server::{
    config::environment::ServerConfig, database::Database, logging, resources::ServerResources,
    server,
};

#[derive(Parser)]
#[command(name = "ironquest-server")]
#[command(about = "IronQuest - reward and progression backend for gamified fitness coaching")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting IronQuest Server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database connected and migrated");

    let resources = Arc::new(ServerResources::new(database, config));
    server::serve(resources).await
}
