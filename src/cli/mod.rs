use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;

pub mod commands;

#[derive(Parser)]
#[command(
    name = "tourspend",
    about = "Tanzania tourism expenditure prediction",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Serialized model file (overrides TOURSPEND_MODEL_PATH)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Training column list (overrides TOURSPEND_COLUMNS_PATH)
    #[arg(long, global = true)]
    pub columns: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the Predict / Summary / About views over HTTP
    Serve {
        /// Listen address (defaults to TOURSPEND_BIND_ADDR)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Predict total expenditure for one trip
    Predict {
        /// Length of stay in days (0.5 - 60.0)
        #[arg(short, long, default_value_t = 7.0)]
        stay: f64,

        /// Daily spending in USD (at least 1.0)
        #[arg(short, long, default_value_t = 150.0)]
        daily: f64,

        /// Purpose of visit: Conference, VFR, Leisure or Business
        #[arg(short, long, default_value = "Conference")]
        purpose: String,

        /// Hotel class: Luxury, Standard or Budget
        #[arg(short = 'H', long, default_value = "Luxury")]
        hotel: String,
    },

    /// Describe the project
    About,

    /// Print the training columns of the loaded model, in order
    Schema,
}

impl Cli {
    /// Apply command line overrides on top of loaded configuration
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(model) = &self.model {
            config.model.model_path = model.clone();
        }
        if let Some(columns) = &self.columns {
            config.model.columns_path = columns.clone();
        }
        if let Commands::Serve { bind: Some(bind) } = &self.command {
            config.server.bind_addr = *bind;
        }
        config
    }
}

/// Execute CLI command with loaded configuration
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let config = cli.apply(config);
    info!(
        model = %config.model.model_path.display(),
        columns = %config.model.columns_path.display(),
        bind = %config.server.bind_addr,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Serve { .. } => {
            info!(address = %config.server.bind_addr, "Starting web surface");
            commands::serve(&config).await?;
        }
        Commands::Predict {
            stay,
            daily,
            purpose,
            hotel,
        } => {
            info!("Running one-shot prediction");
            commands::predict(&config, stay, daily, &purpose, &hotel)?;
        }
        Commands::About => {
            commands::about(&config)?;
        }
        Commands::Schema => {
            commands::schema(&config)?;
        }
    }
    Ok(())
}
