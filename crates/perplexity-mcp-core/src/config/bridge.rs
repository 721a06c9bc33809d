//! Resolved bridge configuration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::completion::PollPolicy;
use crate::secrets::{SecretStore, PERPLEXITY_API_KEY_ENV, PERPLEXITY_PROVIDER};

use super::error::{ConfigError, ConfigResult};
use super::file::{default_config_path, ConfigFile};

/// Default Perplexity API base URL
pub const DEFAULT_API_BASE: &str = "https://api.perplexity.ai";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "PERPLEXITY_API_BASE";

/// Everything the transport and executors need, fixed at start-up
#[derive(Clone)]
pub struct BridgeConfig {
    /// Bearer token for the Perplexity API
    pub api_key: String,
    /// API base URL, without trailing slash
    pub api_base: String,
    /// TCP connect timeout for every request
    pub connect_timeout: Duration,
    /// Total timeout for synchronous completions
    pub sync_timeout: Duration,
    /// Total timeout for async job submission
    pub submit_timeout: Duration,
    /// Total timeout for each status poll
    pub poll_timeout: Duration,
    /// Async poll loop bounds
    pub poll: PollPolicy,
}

impl BridgeConfig {
    /// Create a config with default endpoints and timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            sync_timeout: Duration::from_secs(60),
            submit_timeout: Duration::from_secs(30),
            poll_timeout: Duration::from_secs(10),
            poll: PollPolicy::default(),
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the poll policy
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Synchronous chat completion endpoint
    pub fn sync_endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Async job submission endpoint
    pub fn async_endpoint(&self) -> String {
        format!("{}/async/chat/completions", self.api_base)
    }

    /// Async job status endpoint for one request id
    pub fn async_status_endpoint(&self, request_id: &str) -> String {
        format!("{}/{}", self.async_endpoint(), request_id)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(base) = file.api_base {
            self.api_base = base.trim_end_matches('/').to_string();
        }

        let t = file.timeouts;
        if let Some(secs) = t.connect_secs {
            self.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = t.sync_secs {
            self.sync_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = t.submit_secs {
            self.submit_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = t.poll_secs {
            self.poll_timeout = Duration::from_secs(secs);
        }

        let p = file.polling;
        if let Some(secs) = p.initial_interval_secs {
            self.poll.initial_interval_secs = secs;
        }
        if let Some(secs) = p.max_interval_secs {
            self.poll.max_interval_secs = secs;
        }
        if let Some(n) = p.max_polls {
            self.poll.max_polls = n;
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.poll.max_polls == 0 {
            return Err(ConfigError::Invalid("polling.max_polls must be at least 1".to_string()));
        }
        if self.poll.initial_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "polling.initial_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.poll.max_interval_secs < self.poll.initial_interval_secs {
            return Err(ConfigError::Invalid(
                "polling.max_interval_secs must not be below initial_interval_secs".to_string(),
            ));
        }
        for (name, timeout) in [
            ("connect", self.connect_timeout),
            ("sync", self.sync_timeout),
            ("submit", self.submit_timeout),
            ("poll", self.poll_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::Invalid(format!("timeouts.{}_secs must be at least 1", name)));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("connect_timeout", &self.connect_timeout)
            .field("sync_timeout", &self.sync_timeout)
            .field("submit_timeout", &self.submit_timeout)
            .field("poll_timeout", &self.poll_timeout)
            .field("poll", &self.poll)
            .finish()
    }
}

/// Builds a `BridgeConfig` from defaults, the YAML file and the environment
///
/// Precedence, lowest first: built-in defaults, config file, API base
/// override. The API key always comes from the secret store.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use perplexity_mcp_core::config::ConfigLoader;
/// use perplexity_mcp_core::secrets::EnvSecretStore;
///
/// let config = ConfigLoader::from_env(Arc::new(EnvSecretStore::new())).load()?;
/// # Ok::<(), perplexity_mcp_core::config::ConfigError>(())
/// ```
pub struct ConfigLoader {
    secrets: Arc<dyn SecretStore>,
    file_path: Option<PathBuf>,
    api_base_override: Option<String>,
}

impl ConfigLoader {
    /// Loader with no file and no overrides
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            secrets,
            file_path: None,
            api_base_override: None,
        }
    }

    /// Loader wired to the process environment: default config path and
    /// `PERPLEXITY_API_BASE`
    pub fn from_env(secrets: Arc<dyn SecretStore>) -> Self {
        let api_base_override = std::env::var(API_BASE_ENV).ok().filter(|v| !v.is_empty());
        Self {
            secrets,
            file_path: Some(default_config_path()),
            api_base_override,
        }
    }

    /// Read this YAML file (missing is fine)
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Override the API base URL after the file is applied
    pub fn with_api_base_override(mut self, base: impl Into<String>) -> Self {
        self.api_base_override = Some(base.into());
        self
    }

    /// Config file that will be read, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Resolve the configuration
    pub fn load(&self) -> ConfigResult<BridgeConfig> {
        let api_key = self.secrets.get(PERPLEXITY_PROVIDER).ok_or_else(|| {
            ConfigError::MissingApiKey {
                env_var: PERPLEXITY_API_KEY_ENV.to_string(),
            }
        })?;

        let mut config = BridgeConfig::new(api_key);
        if let Some(path) = &self.file_path {
            config.apply_file(ConfigFile::load(path)?);
        }
        if let Some(base) = &self.api_base_override {
            config = config.with_api_base(base.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecretStore;
    use std::fs;
    use tempfile::tempdir;

    fn secrets() -> Arc<dyn SecretStore> {
        Arc::new(MemorySecretStore::with_secret("perplexity", "pplx-test"))
    }

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::new(secrets()).load().unwrap();
        assert_eq!(config.api_key, "pplx-test");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.sync_timeout, Duration::from_secs(60));
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
        assert_eq!(config.poll_timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.poll, PollPolicy::default());
    }

    #[test]
    fn test_missing_api_key() {
        let err = ConfigLoader::new(Arc::new(MemorySecretStore::new()))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        assert_eq!(err.to_string(), "PERPLEXITY_API_KEY environment variable is required");
    }

    #[test]
    fn test_endpoints() {
        let config = BridgeConfig::new("k").with_api_base("http://localhost:8080/");
        assert_eq!(config.sync_endpoint(), "http://localhost:8080/chat/completions");
        assert_eq!(config.async_endpoint(), "http://localhost:8080/async/chat/completions");
        assert_eq!(
            config.async_status_endpoint("req-1"),
            "http://localhost:8080/async/chat/completions/req-1"
        );
    }

    #[test]
    fn test_file_then_override_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_base: http://file-host\ntimeouts:\n  sync_secs: 5\npolling:\n  initial_interval_secs: 1\n  max_interval_secs: 2\n  max_polls: 7\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(secrets()).with_file(&path);
        assert_eq!(loader.file_path(), Some(&path));
        let from_file = loader.load().unwrap();
        assert_eq!(from_file.api_base, "http://file-host");
        assert_eq!(from_file.sync_timeout, Duration::from_secs(5));
        assert_eq!(from_file.submit_timeout, Duration::from_secs(30));
        assert_eq!(
            from_file.poll,
            PollPolicy {
                initial_interval_secs: 1,
                max_interval_secs: 2,
                max_polls: 7,
            }
        );
        assert_eq!(from_file.api_key, "pplx-test");

        let overridden = ConfigLoader::new(secrets())
            .with_file(&path)
            .with_api_base_override("http://env-host/")
            .load()
            .unwrap();
        assert_eq!(overridden.api_base, "http://env-host");
        assert_eq!(overridden.poll.max_polls, 7);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "polling:\n  max_polls: 0\n").unwrap();

        let err = ConfigLoader::new(secrets()).with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ConfigLoader::new(secrets())
            .with_api_base_override("ftp://nope")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", BridgeConfig::new("pplx-secret"));
        assert!(!debug.contains("pplx-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
