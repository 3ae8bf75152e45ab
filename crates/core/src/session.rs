//! ToolSession trait — the session protocol against the tool-execution host.
//!
//! A session adapter owns one connection lifecycle: connect (constructor on
//! the concrete type), a fixed tool registry, repeated invocations, close.
//! One session serves at most one in-flight query at a time; callers
//! serialize access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Name, description, and input schema of one externally callable tool.
///
/// Serializes as the `tools` entry of a gateway request, so the registry
/// fetched from the session is handed to the inference service verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub input_schema: serde_json::Value,
}

/// The ordered textual content units of one tool invocation.
///
/// Missing or empty content is an empty list, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolReply {
    pub segments: Vec<String>,
}

impl ToolReply {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// All units joined with newlines; the empty reply renders as "".
    pub fn text(&self) -> String {
        self.segments.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// The tool-execution seam.
///
/// `invoke` is only valid between a successful connect and `close`; after
/// `close` it fails with [`SessionError::NotConnected`]. `close` is
/// idempotent and never fails.
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// The registry fetched at connect time, immutable for the session's
    /// lifetime.
    fn tools(&self) -> &[ToolDescriptor];

    /// Invoke one tool by name with a JSON object payload.
    async fn invoke(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> std::result::Result<ToolReply, SessionError>;

    /// Release the underlying transport. Best effort; safe to call twice.
    async fn close(&mut self);
}
