//! Transport trait definition

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::error::CompletionResult;

/// Raw HTTP response: status plus collected body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success for every Perplexity endpoint we call
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> CompletionResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Authenticated HTTP access to the Perplexity API
///
/// Implementations attach the bearer token themselves; executors only pass
/// URLs, bodies and per-request timeouts. A non-200 status is a normal
/// `Ok` response; `Err` means the exchange itself failed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get the transport name (e.g., "http", "mock")
    fn name(&self) -> &str;

    /// POST a JSON body
    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> CompletionResult<HttpResponse>;

    /// GET a resource
    async fn get(&self, url: &str, timeout: Duration) -> CompletionResult<HttpResponse>;
}
