//! Line-oriented MCP server loop

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::logging::SharedLogger;
use crate::routing::Router;
use crate::types::{parse_messages, ToolName, ToolRequest};
use crate::{log_debug, log_info, log_warn};

use super::error::{CallError, ServerResult};
use super::protocol::{initialize_result, tools_list_result, McpToolResult, RpcRequest, RpcResponse};

/// Validate `tools/call` params and build the request to route.
///
/// Checks run in wire order: params, then name and arguments, then the
/// messages array, then the tool name itself.
pub fn parse_tool_call(params: Option<&Value>) -> Result<ToolRequest, CallError> {
    let params = params
        .filter(|p| p.is_object())
        .ok_or(CallError::MissingParameters)?;

    let name = params.get("name").and_then(Value::as_str);
    let arguments = params.get("arguments").filter(|a| a.is_object());
    let (name, arguments) = match (name, arguments) {
        (Some(name), Some(arguments)) => (name, arguments),
        _ => return Err(CallError::InvalidParameters),
    };

    let entries = arguments
        .get("messages")
        .and_then(Value::as_array)
        .ok_or(CallError::InvalidMessages)?;

    let messages = parse_messages(entries);
    if messages.is_empty() {
        return Err(CallError::NoValidMessages);
    }

    let tool: ToolName = name.parse()?;
    Ok(ToolRequest::new(tool, messages))
}

/// MCP server over a pair of byte streams
///
/// Requests are handled strictly one at a time: a slow deep research job
/// holds up every line behind it.
#[derive(Clone)]
pub struct McpServer {
    router: Router,
    logger: SharedLogger,
}

impl McpServer {
    pub fn new(router: Router, logger: SharedLogger) -> Self {
        Self { router, logger }
    }

    /// Read requests until EOF, writing one compact JSON line per response.
    ///
    /// Only stream I/O errors end the loop; bad input is logged and skipped.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> ServerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    log_warn!(self.logger, "Invalid JSON input: {}", e);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let mut out = serde_json::to_vec(&response)?;
                out.push(b'\n');
                writer.write_all(&out).await?;
                writer.flush().await?;
            }
        }

        log_info!(self.logger, "Input closed, shutting down");
        Ok(())
    }

    /// Handle one input line. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                log_warn!(self.logger, "Invalid JSON input: {}", e);
                return None;
            }
        };

        let Some(request) = RpcRequest::from_value(&value) else {
            log_debug!(self.logger, "Ignoring message without numeric id or string method");
            return None;
        };

        Some(self.handle_request(request).await)
    }

    /// Dispatch a validated request
    pub async fn handle_request(&self, request: RpcRequest) -> RpcResponse {
        log_debug!(self.logger, "Handling {} (id {})", request.method, request.id);

        let result = match request.method.as_str() {
            "initialize" => Ok(initialize_result()),
            "tools/list" => Ok(tools_list_result()),
            "tools/call" => self.call_tool(request.params.as_ref()).await,
            _ => Err(CallError::UnknownMethod),
        };

        match result {
            Ok(result) => RpcResponse::success(request.id, result),
            Err(e) => {
                log_debug!(self.logger, "Request {} failed: {}", request.id, e);
                RpcResponse::failure(request.id, &e)
            }
        }
    }

    async fn call_tool(&self, params: Option<&Value>) -> Result<Value, CallError> {
        let request = parse_tool_call(params)?;
        let text = self.router.handle(&request).await.ok_or(CallError::Upstream)?;
        serde_json::to_value(McpToolResult::text(text)).map_err(|_| CallError::Upstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockTransport;
    use crate::config::BridgeConfig;
    use crate::logging::MemoryLogger;
    use crate::types::Message;
    use serde_json::json;
    use std::sync::Arc;

    fn server(mock: &Arc<MockTransport>, logger: &Arc<MemoryLogger>) -> McpServer {
        let config = Arc::new(BridgeConfig::new("k").with_api_base("http://api.test"));
        let router = Router::new(mock.clone(), config, logger.clone());
        McpServer::new(router, logger.clone())
    }

    fn call(id: u64, name: &str, messages: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": name, "arguments": {"messages": messages}}
        })
        .to_string()
    }

    fn error_message(response: &RpcResponse) -> &str {
        response
            .error
            .as_ref()
            .map(|e| e.message.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn test_parse_tool_call_errors() {
        assert_eq!(parse_tool_call(None), Err(CallError::MissingParameters));
        assert_eq!(parse_tool_call(Some(&json!([]))), Err(CallError::MissingParameters));
        assert_eq!(
            parse_tool_call(Some(&json!({"name": 1, "arguments": {}}))),
            Err(CallError::InvalidParameters)
        );
        assert_eq!(
            parse_tool_call(Some(&json!({"name": "perplexity_ask", "arguments": "x"}))),
            Err(CallError::InvalidParameters)
        );
        assert_eq!(
            parse_tool_call(Some(&json!({"name": "perplexity_ask", "arguments": {"messages": {}}}))),
            Err(CallError::InvalidMessages)
        );
        assert_eq!(
            parse_tool_call(Some(&json!({
                "name": "perplexity_ask",
                "arguments": {"messages": [{"role": "user"}, 5]}
            }))),
            Err(CallError::NoValidMessages)
        );
        assert_eq!(
            parse_tool_call(Some(&json!({
                "name": "perplexity_search",
                "arguments": {"messages": [{"role": "user", "content": "hi"}]}
            })))
            .unwrap_err()
            .to_string(),
            "Unknown tool: perplexity_search"
        );
    }

    #[test]
    fn test_parse_tool_call_sets_force_async() {
        let request = parse_tool_call(Some(&json!({
            "name": "perplexity_deep_research",
            "arguments": {"messages": [
                {"role": "system", "content": "Be thorough"},
                {"role": "user", "content": 42},
                {"role": "user", "content": "Go"}
            ]}
        })))
        .unwrap();

        assert_eq!(request.tool, ToolName::DeepResearch);
        assert!(request.force_async);
        assert_eq!(
            request.messages,
            vec![Message::system("Be thorough"), Message::user("Go")]
        );
    }

    #[tokio::test]
    async fn test_dropped_lines_produce_nothing() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let server = server(&mock, &logger);

        assert!(server.handle_line("{not json").await.is_none());
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","id":"abc","method":"initialize"}"#)
            .await
            .is_none());
        assert!(logger.contains("Invalid JSON input"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let server = server(&mock, &logger);

        let init = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(init.id, json!(1));
        assert_eq!(init.result.unwrap()["protocolVersion"], "2025-06-18");

        let list = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        assert_eq!(list.result.unwrap()["tools"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_method_and_tool() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let server = server(&mock, &logger);

        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(error_message(&response), "Unknown method");
        assert_eq!(response.error.as_ref().unwrap().code, -32603);

        let response = server
            .handle_line(&call(6, "perplexity_search", json!([{"role": "user", "content": "hi"}])))
            .await
            .unwrap();
        assert_eq!(error_message(&response), "Unknown tool: perplexity_search");
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ask_success_result() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        mock.push_post_json(200, json!({"choices": [{"message": {"content": "Paris."}}]}));

        let response = server(&mock, &logger)
            .handle_line(&call(
                9,
                "perplexity_ask",
                json!([{"role": "user", "content": "Capital of France?"}]),
            ))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 9,
                "result": {"content": [{"type": "text", "text": "Paris."}], "isError": false}
            })
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic_error() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        mock.push_post_json(401, json!({"error": "invalid key"}));

        let response = server(&mock, &logger)
            .handle_line(&call(3, "perplexity_reason", json!([{"role": "user", "content": "Why?"}])))
            .await
            .unwrap();

        assert_eq!(error_message(&response), "Failed to get response from Perplexity API");
        assert!(!error_message(&response).contains("invalid key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_text_is_a_success_result() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        mock.push_post_json(200, json!({"id": "req-1"}));
        mock.push_get_json(200, json!({"status": "FAILED", "error_message": "rate limited"}));

        let response = server(&mock, &logger)
            .handle_line(&call(
                4,
                "perplexity_deep_research",
                json!([{"role": "user", "content": "What is 2 + 2?"}]),
            ))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "rate limited");
        assert_eq!(result["isError"], false);
        assert_eq!(mock.posts()[0].url, "http://api.test/async/chat/completions");
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n",
            "\n",
            "garbage\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\r\n",
        );

        let mut output = Vec::new();
        server(&mock, &logger)
            .serve(input.as_bytes(), &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].contains('\n'));

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["error"]["message"], "Unknown method");
    }

    #[tokio::test]
    async fn test_serve_skips_non_utf8_lines() {
        let mock = Arc::new(MockTransport::new());
        let logger = Arc::new(MemoryLogger::new());
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}");

        let mut output = Vec::new();
        server(&mock, &logger)
            .serve(&input[..], &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let ids: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
        assert!(logger.contains("Invalid JSON input"));
    }
}
