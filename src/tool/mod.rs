pub mod registry;
pub mod executor;
pub mod maps;

pub use registry::ToolRegistry;
pub use executor::{ToolCall, ToolExecutor};
pub use maps::{MapsTool, MapsToolKind};
pub use tool_types::{ToolDefinition, ToolResult, ToolError};
pub use tool_trait::Tool;
pub use tool_trait::DynTool;

mod tool_types {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    /// Definition of a tool that a host can call.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ToolDefinition {
        /// The name of the tool
        pub name: String,
        /// A description of what the tool does
        pub description: String,
        /// JSON Schema for the tool's input parameters
        #[serde(rename = "inputSchema")]
        pub input_schema: Value,
    }

    /// The result of executing a tool.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ToolResult {
        /// The JSON output of the tool
        pub output: Value,
        /// The `error` field of the output, when the call failed logically
        pub error: Option<String>,
    }

    impl ToolResult {
        /// Creates a successful result.
        pub fn ok(output: Value) -> Self {
            Self {
                output,
                error: None,
            }
        }

        /// Creates a result with an error.
        pub fn error(error: impl Into<String>) -> Self {
            let error = error.into();
            Self {
                output: serde_json::json!({ "error": error }),
                error: Some(error),
            }
        }

        /// Returns whether the output carries an `error` field.
        pub fn is_error(&self) -> bool {
            self.error.is_some()
        }
    }

    /// Errors that can occur when executing a tool.
    #[derive(Debug, thiserror::Error)]
    pub enum ToolError {
        #[error("Invalid arguments: {0}")]
        InvalidArguments(String),
        #[error("Execution failed: {0}")]
        ExecutionFailed(String),
        #[error("Tool not found: {0}")]
        NotFound(String),
        #[error(transparent)]
        Maps(#[from] crate::maps::MapsError),
    }
}

mod tool_trait {
    use super::tool_types::{ToolDefinition, ToolResult, ToolError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    /// Trait representing a tool that a host can call by name.
    #[async_trait]
    pub trait Tool: Send + Sync {
        /// Returns the name of the tool.
        fn name(&self) -> &str;
        /// Returns a description of what the tool does.
        fn description(&self) -> &str;
        /// Returns the JSON Schema for the tool's input parameters.
        fn parameters_schema(&self) -> Value;

        /// Executes the tool with the given arguments.
        async fn execute(&self, args: Value) -> Result<ToolResult, ToolError>;

        /// Converts the tool to its definition.
        fn to_definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: self.parameters_schema(),
            }
        }
    }

    /// A type alias for a dynamic tool reference.
    pub type DynTool = Arc<dyn Tool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_mirrors_output() {
        let result = ToolResult::error("No routes found");
        assert!(result.is_error());
        assert_eq!(result.output, json!({"error": "No routes found"}));

        let result = ToolResult::ok(json!({"results": []}));
        assert!(!result.is_error());
    }

    #[test]
    fn test_definition_uses_mcp_schema_key() {
        let definition = ToolDefinition {
            name: "geocode".to_string(),
            description: "Geocode".to_string(),
            input_schema: json!({"type": "object"}),
        };
        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(value["inputSchema"], json!({"type": "object"}));
    }
}
