//! Anthropic native Messages API gateway.
//!
//! Features:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//! - Native tool use with `tool_use` / `tool_result` content blocks

use async_trait::async_trait;
use askmongo_core::gateway::{ChatRequest, ChatResponse, InferenceGateway, StopReason};
use askmongo_core::message::ContentBlock;
use askmongo_core::GatewayError;
use serde::Deserialize;
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic native Messages API gateway.
pub struct AnthropicGateway {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicGateway {
    /// Create a new Anthropic gateway.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // multi-query answers can take a while
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Convert a raw Messages API response into a `ChatResponse`.
    fn to_chat_response(resp: MessagesResponse) -> ChatResponse {
        if let Some(usage) = &resp.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = resp.stop_reason.as_deref().unwrap_or("end_turn"),
                "Anthropic response received"
            );
        }

        ChatResponse {
            content: resp.content,
            stop_reason: StopReason::from_wire(resp.stop_reason.as_deref()),
        }
    }
}

#[async_trait]
impl InferenceGateway for AnthropicGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<ChatResponse, GatewayError> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(
            gateway = "anthropic",
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending messages request"
        );

        // ChatRequest serializes to the exact wire shape, so it goes out as-is.
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(GatewayError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(GatewayError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(GatewayError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: MessagesResponse = response.json().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to parse Anthropic response: {e}"))
        })?;

        Ok(Self::to_chat_response(api_resp))
    }
}

// --- Anthropic API types ---

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let gateway = AnthropicGateway::new("sk-ant-test");
        assert_eq!(gateway.name(), "anthropic");
        assert_eq!(gateway.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let gateway = AnthropicGateway::new("sk-ant-test").with_base_url("https://custom.proxy.com/");
        assert_eq!(gateway.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn parse_text_response() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "Hello!"}],
                "usage": {"input_tokens": 10, "output_tokens": 5},
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        let chat = AnthropicGateway::to_chat_response(resp);
        assert_eq!(chat.text(), "Hello!");
        assert_eq!(chat.stop_reason, StopReason::EndTurn);
    }

    #[test]
    fn parse_tool_use_response() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_02",
                "model": "claude-sonnet-4-20250514",
                "content": [
                    {"type": "text", "text": "Let me check the database"},
                    {"type": "tool_use", "id": "toolu_abc", "name": "count", "input": {"database": "shop", "collection": "orders"}}
                ],
                "usage": {"input_tokens": 20, "output_tokens": 10},
                "stop_reason": "tool_use"
            }"#,
        )
        .unwrap();

        let chat = AnthropicGateway::to_chat_response(resp);
        assert_eq!(chat.stop_reason, StopReason::ToolUse);
        assert_eq!(chat.content.len(), 2);
        match &chat.content[1] {
            ContentBlock::ToolUse { id, name, input } => {
                assert_eq!(id, "toolu_abc");
                assert_eq!(name, "count");
                assert_eq!(input["database"], "shop");
            }
            _ => panic!("Expected tool_use block"),
        }
    }

    #[test]
    fn parse_missing_stop_reason_defaults_to_end_turn() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_03",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "Done."}],
                "usage": {"input_tokens": 5, "output_tokens": 2}
            }"#,
        )
        .unwrap();

        let chat = AnthropicGateway::to_chat_response(resp);
        assert_eq!(chat.stop_reason, StopReason::EndTurn);
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let gateway =
            AnthropicGateway::new("sk-ant-test").with_base_url("http://127.0.0.1:9");
        let request = ChatRequest {
            model: "claude-sonnet-4-20250514".into(),
            system: None,
            max_tokens: 16,
            messages: vec![askmongo_core::Message::user("hi")],
            tools: Vec::new(),
        };

        let err = gateway.complete(request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
