//! chatpush - Chat Message Push Relay
//!
//! A small service that turns document-created trigger events from a chat
//! collection into broadcast push notifications.

use anyhow::Result;
use chatpush::{app::App, cli::Cli, config::Config, telemetry};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Bring up a minimal subscriber just to report this error.
        telemetry::init_tracing("info");
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    telemetry::init_tracing(&config.log_level);

    info!("chatpush starting up...");

    // Log the loaded configuration settings for visibility
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Bind Address: {}", config.server.bind_addr);
    info!("Delivery Base URL: {}", config.messaging.base_url);
    info!("Delivery Project: {}", config.messaging.project_id);
    info!("Delivery Timeout: {}s", config.messaging.timeout_seconds);
    info!(
        "Delivery Auth Token: {}",
        if config.messaging.auth_token.is_some() {
            "Configured"
        } else {
            "Not configured"
        }
    );
    info!(
        "Metrics Endpoint: {}",
        if config.metrics.enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!("-------------------------------------------------------");

    let mut builder = App::builder(config.clone());
    if config.metrics.enabled {
        let prom_handle = telemetry::install_metrics_recorder()?;
        builder = builder.prometheus_handle(prom_handle);
    }

    let app = builder.build().await?;

    info!("chatpush initialized successfully. Waiting for trigger invocations...");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Shutting down gracefully...");

    app.shutdown().await?;

    info!("All tasks shut down. Exiting.");

    Ok(())
}
