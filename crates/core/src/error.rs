//! Error types for the askmongo domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all askmongo operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Inference gateway errors ---
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    // --- Tool session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Protocol violations ---
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// A query aborted partway through the conversation loop. Callers see
    /// this one variant no matter which round failed; the root cause stays
    /// on the source chain.
    #[error("Query execution failed: {source}")]
    Query {
        #[source]
        source: Box<Error>,
    },

    #[error("Tool-use round limit exceeded after {limit} rounds")]
    RoundLimitExceeded { limit: u32 },

    #[error("Query deadline of {deadline:?} exceeded")]
    DeadlineExceeded { deadline: std::time::Duration },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a loop-internal failure as a query failure, keeping the root
    /// cause as the source.
    pub fn query(source: impl Into<Error>) -> Self {
        Error::Query {
            source: Box::new(source.into()),
        }
    }

    /// The root cause of a query failure, if this is one.
    pub fn query_cause(&self) -> Option<&Error> {
        match self {
            Error::Query { source } => Some(source),
            _ => None,
        }
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by inference service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Failed to connect to MCP server: {0}")]
    ConnectionFailed(String),

    #[error("Not connected. Call connect() first.")]
    NotConnected,

    #[error("Tool call '{tool}' failed: {reason}")]
    ToolCallFailed { tool: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProtocolViolation {
    #[error("Model requested unknown tool '{name}'")]
    UnknownTool { name: String },
}
