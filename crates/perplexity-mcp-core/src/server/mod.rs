//! MCP server over stdio
//!
//! Newline-delimited JSON-RPC 2.0: one request object per input line, one
//! compact response object per output line. Lines without a numeric `id`
//! are dropped without a reply.

mod error;
mod protocol;
mod stdio;

pub use error::{CallError, ServerError, ServerResult};
pub use protocol::{
    initialize_result, tool_catalog, tools_list_result, McpTool, McpToolContent, McpToolResult,
    RpcErrorObject, RpcRequest, RpcResponse, INTERNAL_ERROR, JSONRPC_VERSION, PROTOCOL_VERSION,
    SERVER_INSTRUCTIONS, SERVER_NAME, SERVER_VERSION,
};
pub use stdio::{parse_tool_call, McpServer};
