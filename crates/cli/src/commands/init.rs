//! `askmongo init` — First-time setup: write the default config file.

use askmongo_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🍃 askmongo — First-Time Setup");
    println!("==============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Add your Anthropic API key to the config (or set ANTHROPIC_API_KEY)");
        println!("   2. Add your MongoDB connection string (or set MDB_MCP_CONNECTION_STRING)");
        println!("   3. Run: askmongo shell");
    }

    println!("\n🎉 Setup complete!\n");

    Ok(())
}
