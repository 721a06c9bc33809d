//! Bridge configuration
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `ConfigFile`: optional YAML file
//! - `PERPLEXITY_API_BASE` environment override
//!
//! The API key comes from a `SecretStore`.

mod error;
mod file;
mod bridge;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, TimeoutSettings, PollingSettings, default_config_path, CONFIG_PATH_ENV};
pub use bridge::{BridgeConfig, ConfigLoader, DEFAULT_API_BASE, API_BASE_ENV};
