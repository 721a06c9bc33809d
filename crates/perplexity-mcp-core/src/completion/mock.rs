//! Mock transport for testing
//!
//! Serves scripted responses without network access and records every
//! request, so tests can assert on exactly what would have been sent.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::error::{CompletionError, CompletionResult};
use super::transport::{HttpResponse, Transport};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response
    Response(HttpResponse),
    /// Fail the exchange (connect error, timeout, ...)
    Error(String),
}

impl MockReply {
    fn into_result(self) -> CompletionResult<HttpResponse> {
        match self {
            MockReply::Response(response) => Ok(response),
            MockReply::Error(message) => Err(CompletionError::Transport(message)),
        }
    }
}

/// A request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
    pub timeout: Duration,
}

/// Scripted transport
///
/// POST and GET replies are consumed from separate queues, oldest first.
/// An exhausted GET queue falls back to the default GET reply if one is set;
/// anything else unscripted fails with a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    post_replies: Mutex<VecDeque<MockReply>>,
    get_replies: Mutex<VecDeque<MockReply>>,
    default_get: Mutex<Option<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a mock with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a POST reply with a JSON body
    pub fn push_post_json(&self, status: u16, body: Value) -> &Self {
        self.push_post(MockReply::Response(HttpResponse::new(status, body.to_string())))
    }

    /// Queue a raw POST reply
    pub fn push_post(&self, reply: MockReply) -> &Self {
        self.post_replies.lock().push_back(reply);
        self
    }

    /// Queue a GET reply with a JSON body
    pub fn push_get_json(&self, status: u16, body: Value) -> &Self {
        self.push_get(MockReply::Response(HttpResponse::new(status, body.to_string())))
    }

    /// Queue a raw GET reply
    pub fn push_get(&self, reply: MockReply) -> &Self {
        self.get_replies.lock().push_back(reply);
        self
    }

    /// Reply used for GETs once the queue is empty
    pub fn set_default_get(&self, reply: MockReply) -> &Self {
        *self.default_get.lock() = Some(reply);
        self
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// POST requests received, in order
    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.by_method("POST")
    }

    /// GET requests received, in order
    pub fn gets(&self) -> Vec<RecordedRequest> {
        self.by_method("GET")
    }

    fn by_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    fn record(&self, method: &'static str, url: &str, body: Option<Value>, timeout: Duration) {
        self.requests.lock().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
            timeout,
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> CompletionResult<HttpResponse> {
        self.record("POST", url, Some(body.clone()), timeout);
        let reply = self.post_replies.lock().pop_front();
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(CompletionError::Transport(format!("no scripted POST reply for {}", url))),
        }
    }

    async fn get(&self, url: &str, timeout: Duration) -> CompletionResult<HttpResponse> {
        self.record("GET", url, None, timeout);
        let reply = self
            .get_replies
            .lock()
            .pop_front()
            .or_else(|| self.default_get.lock().clone());
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(CompletionError::Transport(format!("no scripted GET reply for {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_in_order_and_recorded() {
        let mock = MockTransport::new();
        mock.push_post_json(200, json!({"n": 1}))
            .push_post(MockReply::Error("boom".to_string()));

        let timeout = Duration::from_secs(1);
        let first = mock.post_json("http://x/a", &json!({"q": 1}), timeout).await.unwrap();
        assert_eq!(first.json().unwrap()["n"], 1);

        let second = mock.post_json("http://x/b", &json!({}), timeout).await;
        assert!(matches!(second, Err(CompletionError::Transport(m)) if m == "boom"));

        let third = mock.post_json("http://x/c", &json!({}), timeout).await;
        assert!(third.is_err());

        let posts = mock.posts();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].url, "http://x/a");
        assert_eq!(posts[0].body, Some(json!({"q": 1})));
        assert!(mock.gets().is_empty());
    }

    #[tokio::test]
    async fn test_default_get() {
        let mock = MockTransport::new();
        mock.push_get_json(404, json!({}))
            .set_default_get(MockReply::Response(HttpResponse::new(200, "{}")));

        let timeout = Duration::from_secs(1);
        assert_eq!(mock.get("http://x", timeout).await.unwrap().status, 404);
        assert_eq!(mock.get("http://x", timeout).await.unwrap().status, 200);
        assert_eq!(mock.get("http://x", timeout).await.unwrap().status, 200);
        assert_eq!(mock.gets().len(), 3);
    }
}
