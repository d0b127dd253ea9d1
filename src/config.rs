//! Configuration management for chatpush
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer defaults, a `chatpush.toml` file, environment variables,
//! and command-line overrides, in increasing precedence.

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the trigger endpoint server.
    pub server: ServerConfig,
    /// Configuration for the push delivery client.
    pub messaging: MessagingConfig,
    /// Configuration for the metrics endpoint.
    pub metrics: MetricsConfig,
}

/// Configuration for the trigger endpoint server.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// The address the trigger endpoint listens on.
    pub bind_addr: SocketAddr,
}

/// Configuration for the push delivery client.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MessagingConfig {
    /// Base URL of the delivery API.
    pub base_url: String,
    /// The delivery project whose `messages:send` endpoint is called.
    pub project_id: String,
    /// Optional static bearer token for the delivery API.
    pub auth_token: Option<String>,
    /// Per-request timeout for delivery calls, in seconds.
    pub timeout_seconds: u64,
}

/// Configuration for the metrics endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetricsConfig {
    /// Whether to install the recorder and serve `/metrics`.
    pub enabled: bool,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are layered as defaults, then the TOML file (path taken from
    /// `--config`, falling back to `chatpush.toml`), then `CHATPUSH_*`
    /// environment variables (nested keys split on `__`, e.g.
    /// `CHATPUSH_MESSAGING__PROJECT_ID`), then CLI flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("chatpush.toml"));

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("CHATPUSH_").split("__"));

        if let Some(bind) = cli.bind {
            figment = figment.merge(Serialized::default("server.bind_addr", bind));
        }
        if let Some(level) = &cli.log_level {
            figment = figment.merge(Serialized::default("log_level", level));
        }
        if cli.no_metrics {
            figment = figment.merge(Serialized::default("metrics.enabled", false));
        }

        Ok(figment.extract()?)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig {
                bind_addr: ([0, 0, 0, 0], 8080).into(),
            },
            messaging: MessagingConfig {
                base_url: "https://fcm.googleapis.com".to_string(),
                project_id: String::new(),
                auth_token: None,
                timeout_seconds: 10,
            },
            metrics: MetricsConfig { enabled: true },
        }
    }
}
