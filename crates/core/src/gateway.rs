//! InferenceGateway trait — the abstraction over the chat-completion service.
//!
//! A gateway performs exactly one exchange: conversation + system prompt +
//! tool registry in, ordered content blocks + stop condition out. The
//! conversation loop owns everything around it (history, tool dispatch,
//! termination).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::message::{ContentBlock, Message};
use crate::session::ToolDescriptor;

/// One chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model to use (e.g. "claude-sonnet-4-20250514")
    pub model: String,

    /// System prompt, sent as a top-level field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// The conversation so far, oldest first
    pub messages: Vec<Message>,

    /// Tools the model may request, fixed for the whole query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    Other(String),
}

impl StopReason {
    /// Map the wire `stop_reason` string. Absent means the turn simply ended.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("end_turn") | None => Self::EndTurn,
            Some("tool_use") => Self::ToolUse,
            Some("max_tokens") => Self::MaxTokens,
            Some("stop_sequence") => Self::StopSequence,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::EndTurn => "end_turn",
            Self::ToolUse => "tool_use",
            Self::MaxTokens => "max_tokens",
            Self::StopSequence => "stop_sequence",
            Self::Other(s) => s,
        }
    }
}

/// A complete response from the inference service.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Ordered content blocks (text and tool_use)
    pub content: Vec<ContentBlock>,

    /// Stop condition reported by the service
    pub stop_reason: StopReason,
}

impl ChatResponse {
    /// All text segments concatenated in order, with no separator.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ContentBlock::Text { text } = block {
                out.push_str(text);
            }
        }
        out
    }
}

/// The inference service seam.
///
/// The conversation loop calls `complete()` without knowing which service is
/// behind it; tests substitute scripted implementations.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// A human-readable name for this gateway (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Perform one chat-completion exchange.
    async fn complete(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<ChatResponse, GatewayError>;
}
