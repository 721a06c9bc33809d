//! Perplexity MCP Core
//!
//! Model routing and completion plumbing behind the Perplexity MCP bridge.
//! An MCP client talks JSON-RPC over stdio; each tool call is routed to a
//! Sonar model and answered either synchronously or through an async job
//! that is polled with backoff.
//!
//! ## Tools
//!
//! | tool | route |
//! |---|---|
//! | `perplexity_ask` | sync, `sonar-pro` |
//! | `perplexity_reason` | sync, `sonar-reasoning-pro` |
//! | `perplexity_research` | sync `sonar-pro` for simple queries, else async `sonar-deep-research` |
//! | `perplexity_deep_research` | async, `sonar-deep-research` |
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use perplexity_mcp_core::{ConfigLoader, ConsoleLogger, EnvSecretStore, HttpTransport, McpServer, Router};
//!
//! let logger = Arc::new(ConsoleLogger::from_env());
//! let config = Arc::new(ConfigLoader::from_env(Arc::new(EnvSecretStore::new())).load()?);
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let server = McpServer::new(Router::new(transport, config, logger.clone()), logger);
//!
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! server.serve(stdin, tokio::io::stdout()).await?;
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod completion;
pub mod usage;
pub mod routing;
pub mod server;

// Re-export commonly used types
pub use types::{Message, SonarModel, ToolName, ToolRequest, UnknownTool};

pub use secrets::{SecretStore, SecretStoreError, EnvSecretStore, MemorySecretStore};

pub use logging::{Logger, LogLevel, SharedLogger, ConsoleLogger, MemoryLogger};

pub use config::{BridgeConfig, ConfigError, ConfigLoader};

pub use completion::{
    AsyncExecutor, AsyncOutcome, CompletionError, CompletionResult, HttpTransport, PollPolicy,
    SyncExecutor, Transport,
};

pub use usage::{CostInfo, UsageAccountant, UsageInfo};

pub use routing::{classify, Complexity, Route, Router};

pub use server::{McpServer, ServerError};
