//! Chat message types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role name of messages authored by the end user
pub const ROLE_USER: &str = "user";

/// A single chat message as sent upstream
///
/// Roles are kept as plain strings: whatever the MCP client sends is
/// forwarded verbatim, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender ("system", "user", "assistant", ...)
    pub role: String,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a message with an arbitrary role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Whether this message was authored by the user
    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }

    /// Build a message from one entry of a `messages` JSON array.
    ///
    /// Returns `None` unless both `role` and `content` are non-empty strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        let role = value.get("role")?.as_str()?;
        let content = value.get("content")?.as_str()?;
        if role.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self::new(role, content))
    }
}

/// Parse a `messages` JSON array, dropping malformed entries.
///
/// Order of the surviving entries is preserved. The caller decides what an
/// empty result means.
pub fn parse_messages(entries: &[Value]) -> Vec<Message> {
    entries.iter().filter_map(Message::from_json).collect()
}

/// Content of the most recent user message, scanning from the end
pub fn last_user_content(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_user())
        .map(|m| m.content.as_str())
}
