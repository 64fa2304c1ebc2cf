use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, warn};

use super::protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, RequestId, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::error::AppError;
use crate::tool::{ToolCall, ToolError, ToolExecutor};

/// MCP protocol revision spoken by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `initialize`.
pub const SERVER_NAME: &str = "google-maps";

/// Longest input line accepted before it is discarded, in bytes.
pub const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

/// Errors from the MCP server loop.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Framing error: {0}")]
    Codec(#[from] LinesCodecError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serves the registered tools over newline-delimited JSON-RPC.
#[derive(Debug, Clone)]
pub struct McpServer {
    executor: ToolExecutor,
    max_line_length: usize,
}

impl McpServer {
    pub fn new(executor: ToolExecutor) -> Self {
        Self {
            executor,
            max_line_length: MAX_LINE_LENGTH,
        }
    }

    /// Sets the longest input line accepted.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Serves on the process's stdin and stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), AppError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await?;
        Ok(())
    }

    /// Reads one message per line and writes one response per request.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines =
            FramedRead::new(reader, LinesCodec::new_with_max_length(self.max_line_length));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!(limit = self.max_line_length, "MCP message too long");
                    let response = JsonRpcResponse::error(
                        None,
                        INVALID_REQUEST,
                        "Message exceeds maximum line length",
                    );
                    sink.send(serde_json::to_string(&response)?).await?;
                    return Err(LinesCodecError::MaxLineLengthExceeded.into());
                }
                Err(e) => return Err(e.into()),
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                sink.send(serde_json::to_string(&response)?).await?;
            }
        }

        debug!("MCP input closed");
        Ok(())
    }

    /// Handles one raw line; notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Unparseable MCP message: {}", e);
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
            }
        };

        // A null id would be indistinguishable from a notification.
        if message.get("id").is_some_and(Value::is_null) {
            return Some(JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                "Invalid request: id must be a string or number",
            ));
        }

        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    /// Dispatches a decoded request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "MCP request");

        if request.is_notification() {
            return None;
        }

        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                let tools = self.executor.get_tool_definitions().await;
                JsonRpcResponse::success(id, json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn call_tool(&self, id: Option<RequestId>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
            }
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        let call = ToolCall::new(params.name, arguments);

        match self.executor.execute(&call).await {
            Ok(result) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{ "type": "text", "text": result.output.to_string() }],
                    "structuredContent": result.output,
                    "isError": result.is_error(),
                }),
            ),
            Err(ToolError::NotFound(name)) => {
                JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name))
            }
            Err(error) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{ "type": "text", "text": error.to_string() }],
                    "isError": true,
                }),
            ),
        }
    }
}
