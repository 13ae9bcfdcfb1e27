//! Daemon configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;

use groupwatch_core::constants::DEFAULT_POLL_INTERVAL_SECS;

const DEFAULT_LISTEN_PORT: u16 = 4620;

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_class_timezone() -> String {
    "UTC".to_string()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

/// Daemon configuration at ~/.config/groupwatch/config.toml.
///
/// The poll interval also sets the classifier window width, so every end
/// instant lands in the window of exactly one tick.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// IANA timezone the weekly class times are written in.
    #[serde(default = "default_class_timezone")]
    pub class_timezone: String,

    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    pub store: BridgeConfig,
    pub push: BridgeConfig,
}

/// One provider binary plus its opaque settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub provider: String,
    #[serde(flatten)]
    pub config: HashMap<String, toml::Value>,
}

impl BridgeConfig {
    /// Provider settings as the JSON map the bridge protocol carries.
    pub fn json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.config
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine config directory")?
            .join("groupwatch");
        Ok(config_dir.join("config.toml"))
    }

    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Parsed operational timezone for weekly class slots.
    pub fn class_tz(&self) -> Result<Tz> {
        self.class_timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown timezone '{}'", self.class_timezone))
    }
}
