//! Tool identifiers and requests

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::message::Message;

/// Tools exposed over MCP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolName {
    /// Fast Q&A with Sonar Pro
    #[serde(rename = "perplexity_ask")]
    Ask,
    /// Research with complexity-based routing
    #[serde(rename = "perplexity_research")]
    Research,
    /// Multi-step reasoning with Sonar Reasoning Pro
    #[serde(rename = "perplexity_reason")]
    Reason,
    /// Always-async deep research
    #[serde(rename = "perplexity_deep_research")]
    DeepResearch,
}

impl ToolName {
    /// All tools, in advertisement order
    pub const ALL: [ToolName; 4] = [
        ToolName::Ask,
        ToolName::Research,
        ToolName::Reason,
        ToolName::DeepResearch,
    ];

    /// Wire name used in `tools/list` and `tools/call`
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Ask => "perplexity_ask",
            ToolName::Research => "perplexity_research",
            ToolName::Reason => "perplexity_reason",
            ToolName::DeepResearch => "perplexity_deep_research",
        }
    }

    /// Human-readable description advertised to MCP clients
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::Ask => {
                "Fast search and Q&A using Sonar Pro model with real-time web search and citations"
            }
            ToolName::Research => {
                "Comprehensive research and analysis with intelligent routing - uses fast models for simple queries, deep research for complex topics (auto-detects complexity)"
            }
            ToolName::Reason => {
                "Advanced reasoning and multi-step analysis using Sonar Reasoning Pro with chain-of-thought processing"
            }
            ToolName::DeepResearch => {
                "Force deep research analysis using Sonar Deep Research model for comprehensive reports (2-5 minutes, use only for complex research tasks)"
            }
        }
    }

    /// JSON Schema for the tool's arguments
    pub fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "messages": { "type": "array" }
            },
            "required": ["messages"]
        })
    }

    /// Whether calls to this tool skip complexity classification
    pub fn forces_async(&self) -> bool {
        matches!(self, ToolName::DeepResearch)
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tool name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// A parsed `tools/call` request, ready for routing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    /// Which tool was invoked
    pub tool: ToolName,
    /// Conversation history, in client order
    pub messages: Vec<Message>,
    /// Skip the classifier and go straight to deep research
    pub force_async: bool,
}

impl ToolRequest {
    /// Create a request; `force_async` follows from the tool
    pub fn new(tool: ToolName, messages: Vec<Message>) -> Self {
        Self {
            tool,
            force_async: tool.forces_async(),
            messages,
        }
    }
}
