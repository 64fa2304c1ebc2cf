use std::sync::Arc;
use futures::future::join_all;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info_span, warn, Instrument};
use crate::tool::{ToolRegistry, ToolDefinition, ToolResult, ToolError};

/// A request from the host to run one tool.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Identifier used to correlate logs for this call
    pub id: String,
    /// The registered tool name
    pub name: String,
    /// Keyword arguments as a JSON object
    pub arguments: Value,
}

impl ToolCall {
    /// Creates a call with a fresh id.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            arguments,
        }
    }
}

/// Executes tool calls by name.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<Mutex<ToolRegistry>>,
}

impl ToolExecutor {
    /// Creates a new tool executor with the given registry.
    pub fn new(registry: Arc<Mutex<ToolRegistry>>) -> Self {
        Self { registry }
    }

    /// Returns all tool definitions.
    pub async fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        let registry = self.registry.lock().await;
        registry.to_tool_definitions()
    }

    /// Executes a single tool call.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let registry = self.registry.lock().await;
        let tool = registry
            .get(&call.name)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        drop(registry);

        let span = info_span!("tool_call", id = %call.id, tool = %call.name);
        async move {
            debug!("Executing tool");
            let result = tool.execute(call.arguments.clone()).await;
            match &result {
                Ok(result) if result.is_error() => {
                    debug!(error = result.error.as_deref(), "Tool returned an error result")
                }
                Ok(_) => debug!("Tool completed"),
                Err(error) => warn!(%error, "Tool call failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Executes independent tool calls concurrently, preserving their order.
    pub async fn execute_all(&self, calls: &[ToolCall]) -> Vec<Result<ToolResult, ToolError>> {
        join_all(calls.iter().map(|call| self.execute(call))).await
    }
}
