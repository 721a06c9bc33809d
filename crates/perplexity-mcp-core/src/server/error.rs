//! Server error types

use thiserror::Error;

use crate::types::UnknownTool;

/// Errors that stop the serve loop
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Failures reported to the client as JSON-RPC errors
///
/// The display text is exactly the `error.message` sent on the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("Missing parameters")]
    MissingParameters,

    #[error("Invalid tool call parameters")]
    InvalidParameters,

    #[error("Missing or invalid 'messages' parameter")]
    InvalidMessages,

    #[error("Failed to parse messages")]
    NoValidMessages,

    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),

    #[error("Failed to get response from Perplexity API")]
    Upstream,

    #[error("Unknown method")]
    UnknownMethod,
}
