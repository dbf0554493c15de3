// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::api::{start_server, AppState};
use crate::config::{EndpointMode, ServiceConfig};
use crate::summary::SummaryStrategy;
use crate::version;

/// Wiki search proxy and answer service
#[derive(Parser, Debug)]
#[command(name = "wiki-answer-proxy")]
#[command(version)]
#[command(about = "Answers questions from a Confluence knowledge base", long_about = None)]
pub struct Cli {
    /// Bind address, overrides LISTEN_ADDR
    #[arg(long)]
    pub listen_addr: Option<String>,

    /// Endpoint mode, overrides ENDPOINT_MODE
    #[arg(long, value_enum)]
    pub mode: Option<EndpointMode>,

    /// Summary strategy, overrides SUMMARY_STRATEGY
    #[arg(long, value_enum)]
    pub summary_strategy: Option<SummaryStrategy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP endpoint (default)
    Serve,

    /// Print the effective configuration and exit
    CheckConfig,
}

impl Cli {
    /// Apply command-line overrides on top of the environment
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(addr) = &self.listen_addr {
            config.listen_addr = addr.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
            config.invalid_mode = None;
        }
        if let Some(strategy) = self.summary_strategy {
            config.summary.strategy = strategy;
            config.summary.invalid_strategy = None;
        }
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = ServiceConfig::from_env();
    cli.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!(
                "Starting {} (mode: {}, summaries: {})",
                version::get_version_string(),
                config.mode,
                config.summary.effective_strategy()
            );
            if let Err(missing) = config.search.credentials() {
                tracing::warn!("{}; requests will fail until configured", missing);
            }
            start_server(AppState::from_config(config)?).await
        }
        Commands::CheckConfig => {
            println!("{}", serde_json::to_string_pretty(&version::get_version_info())?);
            println!("{:#?}", config);
            Ok(())
        }
    }
}
