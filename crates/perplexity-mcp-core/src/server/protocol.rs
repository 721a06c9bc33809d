//! MCP wire types
//!
//! Only the subset a tools-only server needs: `initialize`, `tools/list`
//! and `tools/call` over newline-delimited JSON-RPC 2.0.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::ToolName;

use super::error::CallError;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "perplexity-mcp-server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_INSTRUCTIONS: &str =
    "Perplexity MCP Server with intelligent model routing: Ask (fast), Research (smart async), Reason (detailed)";

/// JSON-RPC "internal error"; used for every failure this server reports
pub const INTERNAL_ERROR: i64 = -32603;

/// MCP tool definition as advertised by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl From<ToolName> for McpTool {
    fn from(tool: ToolName) -> Self {
        Self {
            name: tool.as_str().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        }
    }
}

/// Every tool this server offers, in a stable order
pub fn tool_catalog() -> Vec<McpTool> {
    ToolName::ALL.into_iter().map(McpTool::from).collect()
}

/// MCP tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolResult {
    pub content: Vec<McpToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl McpToolResult {
    /// Successful single-text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }
}

/// MCP tool content part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum McpToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

/// An incoming request that passed envelope validation
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// Numeric id, echoed back unchanged
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

impl RpcRequest {
    /// Accept only objects with a numeric `id` and a string `method`.
    ///
    /// Notifications (no `id`) are rejected here too, so they never get a
    /// response.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = value.get("id").filter(|id| id.is_number())?.clone();
        let method = value.get("method")?.as_str()?.to_string();
        Some(Self {
            id,
            method,
            params: value.get("params").cloned(),
        })
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Outgoing response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: &CallError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcErrorObject {
                code: INTERNAL_ERROR,
                message: error.to_string(),
            }),
        }
    }
}

/// Result body for `initialize`
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
        },
        "instructions": SERVER_INSTRUCTIONS,
    })
}

/// Result body for `tools/list`
pub fn tools_list_result() -> Value {
    json!({ "tools": tool_catalog() })
}
