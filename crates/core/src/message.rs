//! Message and Conversation domain types.
//!
//! These serialize directly into the Anthropic Messages API wire shape:
//! `content` is either a plain string or an ordered list of typed blocks, so
//! a conversation can be embedded in a gateway request without conversion.
//!
//! A conversation is ephemeral: it lives for exactly one query and is
//! discarded when the query returns.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
///
/// Tool results are carried inside `user` messages as `tool_result` blocks,
/// so only two roles exist on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (and the channel for tool results)
    User,
    /// The model
    Assistant,
}

/// Message content: plain text or an ordered list of content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// One typed content block, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    /// The model requests one tool invocation.
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },

    /// The answer to exactly one `tool_use`, matched by id.
    #[serde(rename = "tool_result")]
    ToolResult { tool_use_id: String, content: String },
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// Create a plain-text user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create an assistant message from raw response content blocks.
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Blocks(blocks),
        }
    }

    /// Create the user message that folds tool results back into the
    /// conversation: one `tool_result` block per preceding `tool_use`.
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Blocks(results),
        }
    }
}

/// An ordered, append-only sequence of messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Messages are never reordered or removed.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
