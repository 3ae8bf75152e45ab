//! MCP session using the official rmcp SDK.
//!
//! Spawns the configured MCP server as a child process and talks to it
//! over stdio. Tool metadata is fetched once at connect time and held
//! for the lifetime of the session.

use askmongo_config::ServerConfig;
use askmongo_core::session::{ToolDescriptor, ToolReply, ToolSession};
use askmongo_core::SessionError;
use async_trait::async_trait;
use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParams, ClientCapabilities, ClientInfo, Implementation, RawContent},
    service::RunningService,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A live MCP session backed by a child-process server.
pub struct McpSession {
    /// The underlying rmcp running service; `None` once closed.
    service: Option<RunningService<RoleClient, ClientInfo>>,
    tools: Vec<ToolDescriptor>,
}

impl McpSession {
    /// Launch the MCP server subprocess and initialize the session.
    ///
    /// The child gets a minimal environment: the MongoDB connection
    /// string plus `PATH`, nothing else. Credentials never travel as
    /// command-line arguments.
    pub async fn connect(
        server: &ServerConfig,
        connection_string: &str,
    ) -> Result<Self, SessionError> {
        info!(command = %server.command, "Starting MCP server");

        let transport = TokioChildProcess::new(Command::new(&server.command).configure(|cmd| {
            cmd.args(&server.args);
            cmd.env_clear();
            cmd.env("MDB_MCP_CONNECTION_STRING", connection_string);
            if let Ok(path) = std::env::var("PATH") {
                cmd.env("PATH", path);
            }
        }))
        .map_err(|e| SessionError::ConnectionFailed(e.to_string()))?;

        let client_info = ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "askmongo".to_string(),
                title: Some("askmongo".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        };

        let service = client_info
            .serve(transport)
            .await
            .map_err(|e| SessionError::ConnectionFailed(e.to_string()))?;

        let listed = service
            .list_tools(Default::default())
            .await
            .map_err(|e| SessionError::ConnectionFailed(e.to_string()))?;

        let tools: Vec<ToolDescriptor> = listed.tools.iter().map(to_descriptor).collect();

        info!(tools = tools.len(), "MCP session established");

        Ok(Self {
            service: Some(service),
            tools,
        })
    }
}

#[async_trait]
impl ToolSession for McpSession {
    fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn invoke(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> std::result::Result<ToolReply, SessionError> {
        let Some(service) = &self.service else {
            return Err(SessionError::NotConnected);
        };

        debug!(tool = name, "Calling MCP tool");

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: input.as_object().cloned(),
            task: None,
        };

        let result = service
            .call_tool(params)
            .await
            .map_err(|e| SessionError::ToolCallFailed {
                tool: name.to_string(),
                reason: e.to_string(),
            })?;

        // Servers report failures like "collection not found" inside the
        // content with is_error set. That text goes back to the model as
        // ordinary result data so it can explain or retry.
        if result.is_error.unwrap_or(false) {
            warn!(tool = name, "MCP tool reported an error result");
        }

        let segments: Vec<String> = result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();

        Ok(ToolReply::new(segments))
    }

    async fn close(&mut self) {
        if let Some(service) = self.service.take() {
            debug!("Closing MCP session");
            if let Err(e) = service.cancel().await {
                warn!(error = %e, "Error closing MCP session");
            }
        }
    }
}

/// Convert an rmcp tool listing entry into our descriptor type.
fn to_descriptor(tool: &rmcp::model::Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.as_deref().unwrap_or_default().to_string(),
        input_schema: serde_json::Value::Object((*tool.input_schema).clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disconnected() -> McpSession {
        McpSession {
            service: None,
            tools: Vec::new(),
        }
    }

    #[test]
    fn disconnected_session_lists_no_tools() {
        let session = disconnected();
        assert!(session.tools().is_empty());
    }

    #[tokio::test]
    async fn invoke_without_connect_fails() {
        let session = disconnected();
        let err = session
            .invoke("find", serde_json::json!({"database": "shop"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotConnected));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut session = disconnected();
        session.close().await;
        session.close().await;
    }

    #[tokio::test]
    async fn connect_to_missing_binary_fails() {
        let server = ServerConfig {
            command: "/definitely/not/a/real/binary".into(),
            args: Vec::new(),
        };
        let result = McpSession::connect(&server, "mongodb://localhost:27017").await;
        assert!(matches!(result, Err(SessionError::ConnectionFailed(_))));
    }
}
