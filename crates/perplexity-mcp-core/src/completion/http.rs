//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use crate::config::BridgeConfig;

use super::error::{CompletionError, CompletionResult};
use super::transport::{HttpResponse, Transport};

/// HTTP transport with bearer-token auth
///
/// One `reqwest::Client` is shared by every request, so connections are
/// pooled. The connect timeout is client-wide; total timeouts are per call.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the bridge configuration
    pub fn new(config: &BridgeConfig) -> CompletionResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| CompletionError::Transport(format!("invalid API key header value: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn collect(response: reqwest::Response) -> CompletionResult<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> CompletionResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;
        Self::collect(response).await
    }

    async fn get(&self, url: &str, timeout: Duration) -> CompletionResult<HttpResponse> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        Self::collect(response).await
    }
}
