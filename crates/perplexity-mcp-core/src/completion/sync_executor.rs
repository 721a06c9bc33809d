//! Synchronous chat completions

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::BridgeConfig;
use crate::logging::SharedLogger;
use crate::types::{Message, SonarModel};
use crate::usage::UsageAccountant;
use crate::log_error;

use super::error::{CompletionError, CompletionResult};
use super::transport::Transport;

/// Pull `choices[0].message.content` out of a completion object
pub fn extract_content(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Issues one blocking chat-completion call per request
#[derive(Clone)]
pub struct SyncExecutor {
    transport: Arc<dyn Transport>,
    config: Arc<BridgeConfig>,
    accountant: UsageAccountant,
    logger: SharedLogger,
}

impl SyncExecutor {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<BridgeConfig>, logger: SharedLogger) -> Self {
        Self {
            transport,
            config,
            accountant: UsageAccountant::new(logger.clone()),
            logger,
        }
    }

    /// Run a completion and return the answer text.
    ///
    /// Non-200 responses, transport failures, bad JSON and missing content
    /// are all errors. Nothing is retried.
    pub async fn complete(&self, messages: &[Message], model: SonarModel) -> CompletionResult<String> {
        let body = json!({
            "model": model.id(),
            "messages": messages,
        });

        let response = self
            .transport
            .post_json(&self.config.sync_endpoint(), &body, self.config.sync_timeout)
            .await
            .inspect_err(|e| log_error!(self.logger, "{} request failed: {}", model, e))?;

        if !response.is_ok() {
            log_error!(self.logger, "HTTP response code: {}", response.status);
            log_error!(self.logger, "Response body: {}", response.body);
            return Err(CompletionError::api_error(response.status, response.body));
        }

        let value = response.json()?;
        self.accountant.record(model, &value);

        extract_content(&value).ok_or_else(|| CompletionError::missing_content(model.id()))
    }
}
