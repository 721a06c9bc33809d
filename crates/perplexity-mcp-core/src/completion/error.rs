//! Completion error types

use thiserror::Error;

/// Errors that can occur while talking to the Perplexity API
///
/// None of these reach the MCP client verbatim; the router logs them and
/// reports a generic failure.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Network/HTTP error (connect, timeout, DNS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered with a non-200 status
    #[error("Perplexity API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// Response had no `choices[0].message.content` string
    #[error("No content in {model} response")]
    MissingContent { model: String },

    /// Async submission succeeded at HTTP level but yielded no job id
    #[error("Async submission rejected: {message}")]
    SubmitRejected { message: String },

    /// Transport could not be set up or used
    #[error("Transport error: {0}")]
    Transport(String),
}

impl CompletionError {
    /// Create an API error
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Create a missing content error
    pub fn missing_content(model: impl Into<String>) -> Self {
        Self::MissingContent {
            model: model.into(),
        }
    }
}

pub type CompletionResult<T> = Result<T, CompletionError>;
