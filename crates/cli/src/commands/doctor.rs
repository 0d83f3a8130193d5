//! `upskiller doctor`: diagnose configuration, provider and store.

use upskiller_config::AppConfig;
use upskiller_core::{Provider, ResourceStore};
use upskiller_store::JsonlStore;

use super::CmdResult;

pub async fn run() -> CmdResult {
    println!("🩺 Upskiller Doctor: System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ⚠️  No config file, using defaults (run `upskiller onboard`)");
        issues += 1;
        AppConfig::load().ok()
    };

    if let Some(config) = &config {
        if config.has_api_key() {
            println!("  ✅ API key configured");
        } else {
            println!("  ⚠️  No API key configured, export GROQ_API_KEY or add api_key to config.toml");
            issues += 1;
        }

        println!("  ℹ️  Provider: {} ({})", config.default_provider, config.default_model);
        if config.has_api_key() || config.default_provider == "ollama" {
            let router = upskiller_providers::router::build_from_config(config);
            match router.default() {
                Some(provider) => match check_provider(provider.as_ref()).await {
                    Ok(()) => println!("  ✅ Provider reachable ({})", provider.name()),
                    Err(problem) => {
                        println!("  ❌ {problem}");
                        issues += 1;
                    }
                },
                None => {
                    println!("  ❌ No default provider configured");
                    issues += 1;
                }
            }
        }
        println!(
            "  ℹ️  Learner:  {} at AI literacy {}/5",
            config.learner.role, config.learner.literacy_level
        );

        let store_path = config.retrieval.store_path();
        match JsonlStore::open(&store_path) {
            Ok(store) => match store.count().await {
                Ok(0) => {
                    println!("  ⚠️  Fragment store is empty: {}", store_path.display());
                    issues += 1;
                }
                Ok(n) => println!("  ✅ Fragment store: {n} fragments ({})", store_path.display()),
                Err(e) => {
                    println!("  ❌ Fragment store unreadable: {e}");
                    issues += 1;
                }
            },
            Err(_) => {
                println!("  ❌ No fragment store at {}, run `upskiller ingest`", store_path.display());
                issues += 1;
            }
        }

        println!("  ℹ️  Embedder: {:?}", config.retrieval.embedder);

        if config.search.enabled {
            println!("  ✅ Web search enabled ({})", config.search.endpoint);
        } else {
            println!("  ℹ️  Web search disabled, research mode will run without live results");
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

/// Probe the provider's health endpoint, describing any problem.
async fn check_provider(provider: &dyn Provider) -> Result<(), String> {
    match provider.health_check().await {
        Ok(true) => Ok(()),
        Ok(false) => Err(format!(
            "Provider {} rejected the health check, verify the API key and base URL",
            provider.name()
        )),
        Err(e) => Err(format!("Provider {} unreachable: {e}", provider.name())),
    }
}
