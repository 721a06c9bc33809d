//! Perplexity MCP Server - Entry Point
//!
//! Serves MCP over stdin/stdout. Diagnostics go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::BufReader;

use perplexity_mcp_core::config::ConfigError;
use perplexity_mcp_core::server::SERVER_VERSION;
use perplexity_mcp_core::{
    log_debug, log_error, log_info, ConfigLoader, ConsoleLogger, EnvSecretStore, HttpTransport, McpServer,
    Router, SharedLogger,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let logger: SharedLogger = Arc::new(ConsoleLogger::from_env());

    let loader = ConfigLoader::from_env(Arc::new(EnvSecretStore::new()));
    if let Some(path) = loader.file_path() {
        log_debug!(logger, "Reading configuration from {}", path.display());
    }

    let config = match loader.load() {
        Ok(config) => Arc::new(config),
        Err(e @ ConfigError::MissingApiKey { .. }) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            log_error!(logger, "Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            log_error!(logger, "Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log_info!(logger, "Perplexity MCP Server v{} with Intelligent Model Routing", SERVER_VERSION);
    log_info!(
        logger,
        "Tools: ask (fast), research (smart), reason (detailed), deep_research (forced)"
    );

    let router = Router::new(transport, config, logger.clone());
    let server = McpServer::new(router, logger.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    match server.serve(stdin, tokio::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!(logger, "Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
