// ABOUTME: Configuration management module for server settings
// ABOUTME: Environment-only configuration; no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management

pub mod environment;

pub use environment::{DatabaseConfig, ServerConfig};
