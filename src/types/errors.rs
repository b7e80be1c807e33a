//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC 2.0 error codes used by the MCP transport.
pub mod jsonrpc {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Main error enum for the toolkit.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool arguments failed schema validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// No materialized tool answers to the requested name.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The Siren API answered with a non-success status.
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// HTTP transport errors from the Siren client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration or tool selector.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal errors (broken invariants, not caller mistakes).
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map to a JSON-RPC error code for protocol-level failures.
    pub fn jsonrpc_code(&self) -> i64 {
        match self {
            Error::Validation(_) | Error::ToolNotFound(_) => jsonrpc::INVALID_PARAMS,
            Error::Serialization(_) => jsonrpc::PARSE_ERROR,
            Error::Config(_)
            | Error::Internal(_)
            | Error::RemoteCall(_)
            | Error::Http(_)
            | Error::Io(_) => jsonrpc::INTERNAL_ERROR,
        }
    }

    /// True for failures raised by the remote client rather than this layer.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::RemoteCall(_) | Error::Http(_))
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn tool_not_found(msg: impl Into<String>) -> Self {
        Self::ToolNotFound(msg.into())
    }

    pub fn remote_call(msg: impl Into<String>) -> Self {
        Self::RemoteCall(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
