//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Provider key for the Perplexity credential
pub const PERPLEXITY_PROVIDER: &str = "perplexity";

/// Environment variable carrying the Perplexity API key
pub const PERPLEXITY_API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Mapping from provider names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(PERPLEXITY_PROVIDER, vec![PERPLEXITY_API_KEY_ENV]);
    m
});

/// Secret store that reads from environment variables
///
/// Read-only. Provider names are mapped to their variables:
/// `perplexity` → `PERPLEXITY_API_KEY`.
/// A full variable name is also accepted as a key.
///
/// # Example
///
/// ```
/// use perplexity_mcp_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// // Both look up PERPLEXITY_API_KEY
/// let key1 = store.get("perplexity");
/// let key2 = store.get("PERPLEXITY_API_KEY");
/// ```
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Get the environment variable names for a provider
    pub fn get_env_vars_for_provider(provider: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP.get(provider.to_lowercase().as_str()).map(|v| v.as_slice())
    }

    fn read(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = Self::read(key) {
            return Some(value);
        }

        Self::get_env_vars_for_provider(key)?
            .iter()
            .find_map(|var| Self::read(var))
    }
}
