//! Core types for routing tool calls
//!
//! This module contains the shared types used by the router, the executors
//! and the MCP server.

mod message;
mod model;
mod tool;

pub use message::{Message, ROLE_USER, parse_messages, last_user_content};
pub use model::{SonarModel, UnknownModel};
pub use tool::{ToolName, ToolRequest, UnknownTool};
