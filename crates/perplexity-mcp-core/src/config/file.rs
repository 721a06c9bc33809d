//! Optional YAML configuration file
//!
//! Looked up at `$PERPLEXITY_MCP_CONFIG`, or `~/.config/perplexity-mcp/config.yaml`.
//! Every field is optional; a missing file means "all defaults".
//!
//! ```yaml
//! api_base: https://api.perplexity.ai
//! timeouts:
//!   connect_secs: 10
//!   sync_secs: 60
//!   submit_secs: 30
//!   poll_secs: 10
//! polling:
//!   initial_interval_secs: 3
//!   max_interval_secs: 8
//!   max_polls: 40
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "PERPLEXITY_MCP_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Base URL of the Perplexity API
    #[serde(default)]
    pub api_base: Option<String>,

    /// HTTP timeouts
    #[serde(default)]
    pub timeouts: TimeoutSettings,

    /// Async poll loop bounds
    #[serde(default)]
    pub polling: PollingSettings,
}

/// Timeout overrides, in seconds
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TimeoutSettings {
    pub connect_secs: Option<u64>,
    pub sync_secs: Option<u64>,
    pub submit_secs: Option<u64>,
    pub poll_secs: Option<u64>,
}

/// Poll loop overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PollingSettings {
    pub initial_interval_secs: Option<u64>,
    pub max_interval_secs: Option<u64>,
    pub max_polls: Option<u32>,
}

impl ConfigFile {
    /// Load a config file; a missing file yields the empty config
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse YAML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Yaml(e.to_string()))
    }
}

/// Default config file location
///
/// `$PERPLEXITY_MCP_CONFIG` wins; otherwise the XDG config directory
/// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join("perplexity-mcp").join("config.yaml")
}
