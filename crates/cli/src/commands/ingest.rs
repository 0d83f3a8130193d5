//! `upskiller ingest`: build the fragment store from local documents.

use std::path::PathBuf;
use upskiller_config::AppConfig;
use upskiller_store::{embedding, Ingestor, JsonlStore};

use super::CmdResult;

pub async fn run(root: Option<PathBuf>) -> CmdResult {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let mut ingest_config = config.ingest.clone();
    if let Some(root) = root {
        ingest_config.root = root;
    }

    let store_path = config.retrieval.store_path();
    if let Some(parent) = store_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = JsonlStore::open_or_create(&store_path);

    let router = upskiller_providers::router::build_from_config(&config);
    let mut ingestor = Ingestor::new(ingest_config.clone());
    if let Some(embedder) = embedding::from_config(&config.retrieval, router.default())? {
        ingestor = ingestor.with_embedder(embedder);
    }

    println!("📚 Ingesting documents from {}", ingest_config.root.display());
    let report = ingestor.run(&store).await?;

    for folder in &report.skipped_folders {
        println!("  ⚠️  Folder not found, skipped: {folder}");
    }
    if report.skipped_files > 0 {
        println!("  ⚠️  {} file(s) yielded no readable text", report.skipped_files);
    }
    println!(
        "  ✅ {} file(s) → {} fragment(s){}",
        report.files,
        report.fragments,
        if report.embedded { " (embedded)" } else { "" }
    );
    println!("  Store: {}", store_path.display());

    Ok(())
}
