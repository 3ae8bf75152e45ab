//! `askmongo doctor` — Diagnose setup problems.

use askmongo_config::AppConfig;
use askmongo_core::ToolSession;
use askmongo_session::McpSession;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 askmongo Doctor — Setup Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Config file is optional — environment variables alone can carry a setup
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — run `askmongo init` (environment variables still work)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
            println!();
            println!("  ⚠️  {issues} issue(s) found. See above for details.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ Anthropic API key configured");
    } else {
        println!("  ❌ No API key — set ANTHROPIC_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    match &config.connection_string {
        Some(connection_string) => {
            println!("  ✅ MongoDB connection string configured");

            // Live check: spawn the MCP server and count its tools
            match McpSession::connect(&config.server, connection_string).await {
                Ok(mut session) => {
                    println!("  ✅ MCP server started ({} tools)", session.tools().len());
                    session.close().await;
                }
                Err(e) => {
                    println!("  ❌ MCP server failed to start: {e}");
                    issues += 1;
                }
            }
        }
        None => {
            println!(
                "  ❌ No connection string — set MDB_MCP_CONNECTION_STRING or add it to config.toml"
            );
            println!("  ⚠️  Skipping MCP server check (needs a connection string)");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
