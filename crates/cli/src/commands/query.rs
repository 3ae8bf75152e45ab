//! One-shot query command: ask a question, print the answer, exit.

use std::sync::Arc;
use std::time::Duration;

use askmongo_agent::QueryLoop;
use askmongo_config::AppConfig;
use askmongo_core::ToolSession;
use askmongo_gateway::AnthropicGateway;
use askmongo_session::McpSession;

use crate::reporter::ConsoleReporter;

pub async fn run(prompt: String, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (api_key, connection_string) = super::require_credentials(&config)?;

    let gateway = Arc::new(AnthropicGateway::new(api_key));
    let mut session = McpSession::connect(&config.server, &connection_string)
        .await
        .map_err(|e| format!("Failed to start MCP server: {e}"))?;

    let mut query_loop = QueryLoop::new(gateway, &config.model)
        .with_max_tokens(config.max_tokens)
        .with_max_rounds(config.max_rounds);
    if let Some(secs) = config.query_timeout_secs {
        query_loop = query_loop.with_deadline(Duration::from_secs(secs));
    }
    if !quiet {
        query_loop = query_loop.with_observer(Arc::new(ConsoleReporter));
    }

    // Close the server on both paths before surfacing the outcome
    let outcome = query_loop.execute(&session, &prompt, None).await;
    session.close().await;
    let outcome = outcome?;

    println!("{}", outcome.response);

    Ok(())
}
