//! `upskiller onboard`: first-time setup.

use upskiller_config::AppConfig;

use super::CmdResult;

pub async fn run() -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let workspace_dir = AppConfig::workspace_dir();
    let store_dir = config_dir.join("store");

    println!("🎓 Semiconductor Logistics AI-Upskiller: First-Time Setup");
    println!("==========================================================\n");

    for (label, dir) in [
        ("config", &config_dir),
        ("workspace", &workspace_dir),
        ("store", &store_dir),
    ] {
        if dir.exists() {
            println!("  {label} directory exists: {}", dir.display());
        } else {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created {label} directory: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Export GROQ_API_KEY or add api_key to {}", config_path.display());
        println!("   2. Put your documents in 'Job Descriptions', 'Industry Reports'");
        println!("      and 'Training Curricula' folders, then run: upskiller ingest");
        println!("   3. Run: upskiller chat\n");
    }

    println!("🎉 Setup complete!\n");
    Ok(())
}
