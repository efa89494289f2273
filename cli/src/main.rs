// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! # AgentHub CLI
//!
//! The `agenthub` binary runs the AgentHub HTTP API and carries a few
//! operator utilities.
//!
//! ## Commands
//!
//! - `agenthub serve` - Run the HTTP API until Ctrl+C or SIGTERM
//! - `agenthub config show|validate|generate` - Configuration management
//! - `agenthub token issue` - Sign a bearer token with the configured secret

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use agenthub::commands::{self, ConfigCommand, TokenCommand};
use agenthub::server;
use agenthub_core::domain::server_config::ServerConfig;

/// AgentHub - agent registry and coordination API
#[derive(Parser)]
#[command(name = "agenthub")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "AGENTHUB_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "AGENTHUB_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    #[command(name = "serve")]
    Serve {
        /// Bind host (overrides spec.server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides spec.server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Bearer token utilities
    #[command(name = "token")]
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            let mut config = ServerConfig::load_or_default(cli.config)
                .context("Failed to load configuration")?;
            if let Some(host) = host {
                config.spec.server.host = host;
            }
            if let Some(port) = port {
                config.spec.server.port = port;
            }
            info!("Starting AgentHub on {}", config.spec.server.bind_address());
            server::start_server(config).await
        }
        Some(Commands::Config { command }) => commands::config::handle_command(command, cli.config).await,
        Some(Commands::Token { command }) => commands::token::handle_command(command, cli.config).await,
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
