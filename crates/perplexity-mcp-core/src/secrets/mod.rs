//! Credential lookup
//!
//! - `SecretStore` trait for credential sources
//! - `EnvSecretStore` for the process environment
//! - `MemorySecretStore` for tests

mod traits;
mod env_store;
mod memory_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::{EnvSecretStore, PERPLEXITY_API_KEY_ENV, PERPLEXITY_PROVIDER};
pub use memory_store::MemorySecretStore;
