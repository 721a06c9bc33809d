//! Asynchronous (submit then poll) chat completions
//!
//! ```text
//! SUBMITTING ─┬─> SUBMIT_FAILED                      (Err)
//!             └─> SUBMITTED ─> POLLING ─┬─> COMPLETED (Ok(Completed) or Err(MissingContent))
//!                                       ├─> FAILED    (Ok(Failed))
//!                                       └─> TIMED_OUT (Ok(TimedOut))
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Map, Value};

use crate::config::BridgeConfig;
use crate::logging::SharedLogger;
use crate::types::{Message, SonarModel};
use crate::usage::UsageAccountant;
use crate::{log_debug, log_error, log_info, log_warn};

use super::error::{CompletionError, CompletionResult};
use super::sync_executor::extract_content;
use super::transport::Transport;

/// Answer returned when the poll ceiling is reached
pub const TIMEOUT_ADVISORY: &str =
    "Research request timed out. Try using perplexity_ask for simpler questions.";

/// Answer returned for a FAILED job without an `error_message`
pub const UNKNOWN_FAILURE: &str = "Request failed with unknown error";

/// Remote job status as reported by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    InProgress,
    Completed,
    Failed,
    /// Any status string we do not recognize; treated as still running
    Other(String),
}

impl JobStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "CREATED" => JobStatus::Created,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// A submitted job, alive until it reaches a terminal status or is abandoned
#[derive(Debug, Clone)]
pub struct AsyncJob {
    pub request_id: String,
    pub model: SonarModel,
    pub submitted_at: Instant,
    pub status: JobStatus,
}

impl AsyncJob {
    fn new(request_id: String, model: SonarModel) -> Self {
        Self {
            request_id,
            model,
            submitted_at: Instant::now(),
            status: JobStatus::Created,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.submitted_at.elapsed()
    }
}

/// How an async job ended, from the caller's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncOutcome {
    /// The job completed with this answer
    Completed(String),
    /// The job failed remotely; the text says why
    Failed(String),
    /// The poll ceiling was hit; the remote job may still be running
    TimedOut,
}

impl AsyncOutcome {
    /// Flatten into the text handed back to the MCP client.
    ///
    /// Remote failures and timeouts are answers, not errors.
    pub fn into_answer(self) -> String {
        match self {
            AsyncOutcome::Completed(text) | AsyncOutcome::Failed(text) => text,
            AsyncOutcome::TimedOut => TIMEOUT_ADVISORY.to_string(),
        }
    }
}

/// Submits async jobs and polls them to a terminal state
#[derive(Clone)]
pub struct AsyncExecutor {
    transport: Arc<dyn Transport>,
    config: Arc<BridgeConfig>,
    accountant: UsageAccountant,
    logger: SharedLogger,
}

impl AsyncExecutor {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<BridgeConfig>, logger: SharedLogger) -> Self {
        Self {
            transport,
            config,
            accountant: UsageAccountant::new(logger.clone()),
            logger,
        }
    }

    /// Submit a job and poll it until it finishes or the ceiling is hit.
    ///
    /// `Err` means submission failed, or the job completed without content.
    pub async fn complete(&self, messages: &[Message], model: SonarModel) -> CompletionResult<AsyncOutcome> {
        let mut job = self.submit(messages, model).await?;
        log_info!(self.logger, "Submitted async research request: {}", job.request_id);
        log_debug!(
            self.logger,
            "Polling {} up to {} times, at most {}s of waiting",
            job.request_id,
            self.config.poll.max_polls,
            self.config.poll.max_total_wait().as_secs()
        );

        let max_polls = self.config.poll.max_polls;
        for (i, interval) in self.config.poll.schedule().take(max_polls as usize).enumerate() {
            tokio::time::sleep(interval).await;

            if let Some(result) = self.poll(&mut job).await {
                log_debug!(
                    self.logger,
                    "Job {} finished as {:?} after {:.1}s",
                    job.request_id,
                    job.status,
                    job.elapsed().as_secs_f64()
                );
                return result;
            }

            log_info!(self.logger, "Waiting for research completion... ({}/{})", i + 1, max_polls);
        }

        log_warn!(
            self.logger,
            "Job {} still {:?} after {} polls; abandoning",
            job.request_id,
            job.status,
            max_polls
        );
        Ok(AsyncOutcome::TimedOut)
    }

    async fn submit(&self, messages: &[Message], model: SonarModel) -> CompletionResult<AsyncJob> {
        let mut request = Map::new();
        request.insert("model".to_string(), json!(model.id()));
        if let Some(effort) = model.reasoning_effort() {
            request.insert("reasoning_effort".to_string(), json!(effort));
        }
        request.insert("messages".to_string(), serde_json::to_value(messages)?);
        let body = json!({ "request": request });

        let response = self
            .transport
            .post_json(&self.config.async_endpoint(), &body, self.config.submit_timeout)
            .await
            .inspect_err(|e| log_error!(self.logger, "Async submission failed: {}", e))?;

        if !response.is_ok() {
            log_error!(self.logger, "HTTP response code: {}", response.status);
            log_error!(self.logger, "Response body: {}", response.body);
            return Err(CompletionError::api_error(response.status, response.body));
        }

        let value = response.json()?;
        match value.get("id").and_then(Value::as_str) {
            Some(id) => Ok(AsyncJob::new(id.to_string(), model)),
            None => {
                log_error!(self.logger, "Async submission returned no request id: {}", response.body);
                Err(CompletionError::SubmitRejected {
                    message: "response has no string id".to_string(),
                })
            }
        }
    }

    /// One status check. `None` means keep polling.
    ///
    /// Transport errors, non-200 statuses and unparseable bodies all count as
    /// "still in progress"; a revoked key therefore looks like a slow job
    /// until the poll ceiling.
    async fn poll(&self, job: &mut AsyncJob) -> Option<CompletionResult<AsyncOutcome>> {
        let url = self.config.async_status_endpoint(&job.request_id);
        let response = match self.transport.get(&url, self.config.poll_timeout).await {
            Ok(response) => response,
            Err(e) => {
                log_debug!(self.logger, "Status check for {} failed: {}", job.request_id, e);
                return None;
            }
        };

        if !response.is_ok() {
            log_debug!(
                self.logger,
                "Status check for {} returned HTTP {}",
                job.request_id,
                response.status
            );
            return None;
        }

        let value = response.json().ok()?;
        job.status = JobStatus::parse(value.get("status")?.as_str()?);
        if !job.status.is_terminal() {
            return None;
        }

        match job.status {
            JobStatus::Completed => {
                let completion = value.get("response");
                if let Some(completion) = completion {
                    self.accountant.record(job.model, completion);
                }
                let content = completion.and_then(extract_content);
                Some(
                    content
                        .map(AsyncOutcome::Completed)
                        .ok_or_else(|| CompletionError::missing_content(job.model.id())),
                )
            }
            JobStatus::Failed => {
                let message = value
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_FAILURE);
                Some(Ok(AsyncOutcome::Failed(message.to_string())))
            }
            JobStatus::Created | JobStatus::InProgress | JobStatus::Other(_) => None,
        }
    }
}
