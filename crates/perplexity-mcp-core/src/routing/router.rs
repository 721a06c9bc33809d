//! Tool-to-model routing

use std::sync::Arc;

use crate::completion::{AsyncExecutor, SyncExecutor, Transport};
use crate::config::BridgeConfig;
use crate::logging::SharedLogger;
use crate::types::{last_user_content, Message, SonarModel, ToolName, ToolRequest};
use crate::{log_error, log_info};

use super::classifier::{classify, Complexity};

/// How a request will be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Sync(SonarModel),
    Async(SonarModel),
}

impl Route {
    pub fn model(&self) -> SonarModel {
        match self {
            Route::Sync(model) | Route::Async(model) => *model,
        }
    }
}

/// Pick the execution mode and model for a call.
///
/// Only an unforced `Research` call consults the classifier, and only on
/// the most recent user message. No user message at all means deep research.
pub fn plan(tool: ToolName, messages: &[Message], force_async: bool) -> Route {
    match tool {
        ToolName::Ask => Route::Sync(SonarModel::SonarPro),
        ToolName::Reason => Route::Sync(SonarModel::SonarReasoningPro),
        ToolName::DeepResearch => Route::Async(SonarModel::SonarDeepResearch),
        ToolName::Research if force_async => Route::Async(SonarModel::SonarDeepResearch),
        ToolName::Research => match last_user_content(messages).map(classify) {
            Some(Complexity::Simple) => Route::Sync(SonarModel::SonarPro),
            Some(Complexity::Complex) | None => Route::Async(SonarModel::SonarDeepResearch),
        },
    }
}

/// Dispatches tool calls to the sync or async executor
#[derive(Clone)]
pub struct Router {
    sync: SyncExecutor,
    async_exec: AsyncExecutor,
    logger: SharedLogger,
}

impl Router {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<BridgeConfig>, logger: SharedLogger) -> Self {
        Self {
            sync: SyncExecutor::new(transport.clone(), config.clone(), logger.clone()),
            async_exec: AsyncExecutor::new(transport, config, logger.clone()),
            logger,
        }
    }

    /// Route a parsed request
    pub async fn handle(&self, request: &ToolRequest) -> Option<String> {
        self.route(&request.messages, request.tool, request.force_async).await
    }

    /// Produce the answer text for a tool call.
    ///
    /// `None` means the call failed; the reason has already been logged.
    pub async fn route(&self, messages: &[Message], tool: ToolName, force_async: bool) -> Option<String> {
        match tool {
            ToolName::Research => log_info!(self.logger, "Starting intelligent research analysis..."),
            ToolName::DeepResearch => log_info!(self.logger, "Starting forced deep research analysis..."),
            ToolName::Ask | ToolName::Reason => {}
        }

        let route = plan(tool, messages, force_async);
        if tool == ToolName::Research && route == Route::Sync(SonarModel::SonarPro) {
            log_info!(self.logger, "Query appears simple, using sonar-pro instead of deep research");
        }

        let result = match route {
            Route::Sync(model) => self.sync.complete(messages, model).await,
            Route::Async(model) => self
                .async_exec
                .complete(messages, model)
                .await
                .map(|outcome| outcome.into_answer()),
        };

        result
            .inspect_err(|e| log_error!(self.logger, "{} via {} failed: {}", tool, route.model(), e))
            .ok()
    }
}
