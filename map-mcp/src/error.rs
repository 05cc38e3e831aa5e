//! Error types for the resort map tool server

use map_client::ClientError;
use map_core::MapError;
use thiserror::Error;

/// Result type for server operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can occur in the tool server
#[derive(Error, Debug)]
pub enum McpError {
    /// No tool with this name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Arguments rejected by the tool's input schema
    #[error("Invalid arguments for {tool}: {}", .errors.join("; "))]
    InvalidArguments { tool: String, errors: Vec<String> },

    /// Malformed request parameters
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// No resource at this URI
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Hotel API failure
    #[error("{0}")]
    Api(#[from] ClientError),

    /// View state rejected the operation
    #[error("{0}")]
    Map(#[from] MapError),

    /// Tool definition carries a schema that does not compile
    #[error("Schema error in {tool}: {message}")]
    Schema { tool: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error object
    pub fn to_rpc_error(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string()
        })
    }

    /// Error code for the JSON-RPC protocol
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::ToolNotFound(_) => -32602,
            McpError::InvalidArguments { .. } => -32602,
            McpError::InvalidParams(_) => -32602,
            McpError::ResourceNotFound(_) => -32002,
            McpError::Api(_) => -32603,
            McpError::Map(_) => -32603,
            McpError::Schema { .. } => -32603,
            McpError::Io(_) => -32603,
            McpError::Serialization(_) => -32603,
        }
    }

    /// Whether this belongs in a tool result with `isError` set, rather
    /// than in a JSON-RPC error
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            McpError::InvalidArguments { .. } | McpError::Api(_) | McpError::Map(_)
        )
    }
}
