//! `askmongo shell` — Interactive natural-language query shell.

use std::sync::Arc;
use std::time::Duration;

use askmongo_agent::{DirectOps, QueryLoop};
use askmongo_config::AppConfig;
use askmongo_core::ToolSession;
use askmongo_gateway::AnthropicGateway;
use askmongo_session::McpSession;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::reporter::ConsoleReporter;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (api_key, connection_string) = super::require_credentials(&config)?;

    let gateway = Arc::new(AnthropicGateway::new(api_key));
    let mut session = McpSession::connect(&config.server, &connection_string)
        .await
        .map_err(|e| format!("Failed to start MCP server: {e}"))?;

    let mut query_loop = QueryLoop::new(gateway, &config.model)
        .with_max_tokens(config.max_tokens)
        .with_max_rounds(config.max_rounds)
        .with_observer(Arc::new(ConsoleReporter));
    if let Some(secs) = config.query_timeout_secs {
        query_loop = query_loop.with_deadline(Duration::from_secs(secs));
    }

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     MongoDB Natural Language Query Shell     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:  {}", config.model);
    println!("  Tools:  {} available", session.tools().len());
    println!();
    println!("  Ask questions about your data in plain English.");
    println!("  Type 'help' for examples, 'quit' to leave.");
    println!();

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    // Close the server on every exit path before surfacing any read error
    let result = repl(&mut lines, &session, &query_loop).await;
    session.close().await;
    result?;

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

/// Drive the prompt/dispatch loop until EOF or a quit command.
async fn repl<R>(
    lines: &mut Lines<R>,
    session: &dyn ToolSession,
    query_loop: &QueryLoop,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    use std::io::Write;

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let keyword = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        match (keyword.as_str(), args.as_slice()) {
            ("quit", []) | ("exit", []) | ("q", []) => break,
            ("help", []) => print_help(),
            ("databases", []) => show(DirectOps::new(session).list_databases().await),
            ("collections", [db]) => show(DirectOps::new(session).list_collections(db).await),
            ("collections", _) => println!("  Usage: collections <database>"),
            ("schema", [db, coll]) => {
                show(DirectOps::new(session).collection_schema(db, coll).await)
            }
            ("schema", _) => println!("  Usage: schema <database> <collection>"),
            _ => match query_loop.execute(session, input, None).await {
                Ok(outcome) => {
                    println!();
                    for line in outcome.response.lines() {
                        println!("  Assistant > {line}");
                    }
                    println!();
                }
                Err(e) => {
                    eprintln!("  [Error] {e}");
                    println!();
                }
            },
        }
    }

    Ok(())
}

fn show(result: askmongo_core::Result<String>) {
    match result {
        Ok(output) => println!("{output}"),
        Err(e) => eprintln!("  [Error] {e}"),
    }
}

fn print_help() {
    println!();
    println!("  Example queries:");
    println!("    How many documents are in the movies collection?");
    println!("    Show me the top 10 highest rated movies");
    println!("    Find movies directed by Christopher Nolan");
    println!("    What is the average runtime by genre?");
    println!("    How many movies were released each year since 2000?");
    println!();
    println!("  Special commands:");
    println!("    databases                      List all databases");
    println!("    collections <database>         List collections in a database");
    println!("    schema <database> <collection> Describe a collection's schema");
    println!("    help                           Show this message");
    println!("    quit                           Leave the shell");
    println!();
}
