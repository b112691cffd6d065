use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::view::DisplayOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub server: ServerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub show_tips: bool,
    pub show_contributors: bool,
}

impl DisplayConfig {
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions {
            show_tips: self.show_tips,
            show_contributors: self.show_contributors,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file - this sets env vars that aren't already set
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to [`Config::default`]; set but unparseable keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            model: ModelConfig {
                model_path: lookup("TOURSPEND_MODEL_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.model.model_path),
                columns_path: lookup("TOURSPEND_COLUMNS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.model.columns_path),
            },
            server: ServerConfig {
                bind_addr: parse_or(&lookup, "TOURSPEND_BIND_ADDR", defaults.server.bind_addr)?,
                session_capacity: parse_or(
                    &lookup,
                    "TOURSPEND_SESSION_CAPACITY",
                    defaults.server.session_capacity,
                )?,
            },
            display: DisplayConfig {
                show_tips: parse_or(&lookup, "TOURSPEND_SHOW_TIPS", defaults.display.show_tips)?,
                show_contributors: parse_or(
                    &lookup,
                    "TOURSPEND_SHOW_CONTRIBUTORS",
                    defaults.display.show_contributors,
                )?,
            },
        };

        if config.server.session_capacity == 0 {
            anyhow::bail!("Invalid TOURSPEND_SESSION_CAPACITY value (must be at least 1)");
        }

        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value '{}'", key, raw)),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                model_path: PathBuf::from("models/tourism_model.json"),
                columns_path: PathBuf::from("models/tourism_training_columns.json"),
            },
            server: ServerConfig {
                bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
                session_capacity: 1024,
            },
            display: DisplayConfig {
                show_tips: true,
                show_contributors: false,
            },
        }
    }
}
