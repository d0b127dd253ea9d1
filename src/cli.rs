//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and merged over
//! the configuration from the `chatpush.toml` file and environment variables.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Relays newly created chat message documents to a broadcast push topic.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address for the trigger endpoint to listen on.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// The logging level (e.g. "info", "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable the metrics recorder and the /metrics route.
    #[arg(long)]
    pub no_metrics: bool,
}
