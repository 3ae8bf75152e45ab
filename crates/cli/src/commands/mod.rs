pub mod doctor;
pub mod init;
pub mod query;
pub mod shell;

use askmongo_config::AppConfig;

/// Pull the API key and connection string out of the config, printing
/// setup guidance for whichever one is missing.
pub(crate) fn require_credentials(
    config: &AppConfig,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let Some(api_key) = config.api_key.clone() else {
        eprintln!("❌ No Anthropic API key configured.");
        eprintln!();
        eprintln!("  Set one of:");
        eprintln!("    export ASKMONGO_API_KEY='sk-ant-...'");
        eprintln!("    export ANTHROPIC_API_KEY='sk-ant-...'");
        eprintln!();
        eprintln!(
            "  Or add api_key to: {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        eprintln!("  Get a key at: https://console.anthropic.com/");
        return Err("No API key found. See above for setup instructions.".into());
    };

    let Some(connection_string) = config.connection_string.clone() else {
        eprintln!("❌ No MongoDB connection string configured.");
        eprintln!();
        eprintln!("  Set it with:");
        eprintln!("    export MDB_MCP_CONNECTION_STRING='mongodb+srv://...'");
        eprintln!();
        eprintln!(
            "  Or add connection_string to: {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        return Err("No connection string found. See above for setup instructions.".into());
    };

    Ok((api_key, connection_string))
}
