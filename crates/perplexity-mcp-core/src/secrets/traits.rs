//! Core trait for credential lookup

use thiserror::Error;

/// Errors that can occur during secret store operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for credential sources
///
/// Implementations:
/// - `EnvSecretStore`: process environment (production)
/// - `MemorySecretStore`: in-memory map (tests)
///
/// The bridge reads its API key once at start-up; stores are never
/// consulted again afterwards.
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret by key
    ///
    /// The key can be a provider name (e.g. "perplexity") or a direct
    /// variable name (e.g. "PERPLEXITY_API_KEY"). Empty values count as
    /// absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Retrieve a secret or fail with `NotFound`
    fn require(&self, key: &str) -> SecretStoreResult<String> {
        self.get(key)
            .ok_or_else(|| SecretStoreError::NotFound(key.to_string()))
    }
}
