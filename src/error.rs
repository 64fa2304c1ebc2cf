//! Error types for the maps-tools library.

use thiserror::Error;

/// Unified error type for the crate.
///
/// Returned by [`McpServer::serve_stdio`](crate::mcp::McpServer::serve_stdio).
#[derive(Debug, Error)]
pub enum AppError {
    /// Maps adapter error
    #[error("Maps error: {0}")]
    Maps(#[from] crate::maps::MapsError),

    /// Tool-related error
    #[error("Tool error: {0}")]
    Tool(#[from] crate::tool::ToolError),

    /// MCP server error
    #[error("MCP error: {0}")]
    Mcp(#[from] crate::mcp::McpError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
