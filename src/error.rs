//! Error types for the mock MCP server.

use thiserror::Error;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mock MCP server.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Protocol Errors =====
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    // ===== Session Errors =====
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Client disconnected")]
    Disconnected,

    // ===== Internal Errors =====
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
