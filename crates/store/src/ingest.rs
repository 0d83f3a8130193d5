//! Offline ingestion: documents on disk → fragments in the JSONL store.
//!
//! Walks each configured folder under the ingest root, extracts text from
//! plain-text, Markdown and PDF files, splits it into overlapping chunks,
//! embeds them, and replaces the store contents in one flush.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use upskiller_config::IngestConfig;
use upskiller_core::error::RetrievalError;
use upskiller_core::{Fragment, Provenance};
use walkdir::WalkDir;

use crate::embedding::Embedder;
use crate::jsonl::JsonlStore;
use crate::splitter::TextSplitter;

/// Fragments sent per embedding request.
const EMBED_BATCH: usize = 32;

/// What an ingestion run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub files: usize,
    pub fragments: usize,
    /// Configured folders that did not exist under the root
    pub skipped_folders: Vec<String>,
    /// Files that matched an extension but yielded no readable text
    pub skipped_files: usize,
    pub embedded: bool,
}

pub struct Ingestor {
    config: IngestConfig,
    splitter: TextSplitter,
    embedder: Option<Arc<dyn Embedder>>,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap);
        Self {
            config,
            splitter,
            embedder: None,
        }
    }

    /// Embed every fragment with `embedder` before writing the store.
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Load and split every document without touching a store.
    pub fn collect(&self) -> (Vec<Fragment>, IngestReport) {
        let mut report = IngestReport::default();
        let mut fragments = Vec::new();

        for folder in &self.config.folders {
            let dir = self.config.root.join(folder);
            if !dir.is_dir() {
                warn!(folder = %folder, path = %dir.display(), "Document folder missing, skipping");
                report.skipped_folders.push(folder.clone());
                continue;
            }

            info!(folder = %folder, "Loading documents");

            for entry in WalkDir::new(&dir)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!(error = %e, "Error walking document folder");
                        continue;
                    }
                };

                let path = entry.path();
                if !entry.file_type().is_file() || !self.has_wanted_extension(path) {
                    continue;
                }

                let text = match read_document(path) {
                    Ok(text) if !text.trim().is_empty() => text,
                    Ok(_) => {
                        warn!(path = %path.display(), "Skipping document with no text");
                        report.skipped_files += 1;
                        continue;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                        report.skipped_files += 1;
                        continue;
                    }
                };

                let file = path
                    .strip_prefix(&dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned();

                let before = fragments.len();
                fragments.extend(self.splitter.split(&text).into_iter().enumerate().map(
                    |(chunk_index, chunk)| {
                        Fragment::new(
                            chunk,
                            Provenance {
                                folder: folder.clone(),
                                file: file.clone(),
                                chunk_index,
                            },
                        )
                    },
                ));

                debug!(file = %file, chunks = fragments.len() - before, "Document split");
                report.files += 1;
            }
        }

        report.fragments = fragments.len();
        (fragments, report)
    }

    /// Ingest into `store`, replacing whatever it held.
    pub async fn run(&self, store: &JsonlStore) -> Result<IngestReport, RetrievalError> {
        let (mut fragments, mut report) = self.collect();

        if let Some(embedder) = &self.embedder {
            info!(model = embedder.name(), fragments = fragments.len(), "Embedding fragments");
            embed_fragments(embedder.as_ref(), &mut fragments).await?;
            report.embedded = !fragments.is_empty();
        }

        store.replace_all(fragments).await?;

        info!(
            files = report.files,
            fragments = report.fragments,
            skipped_folders = report.skipped_folders.len(),
            path = %store.path().display(),
            "Ingestion complete"
        );

        Ok(report)
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

/// Text of a document, by extension. PDFs go through `pdf-extract`.
fn read_document(path: &Path) -> Result<String, String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return std::fs::read_to_string(path).map_err(|e| e.to_string());
    }

    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    // pdf-extract panics on some malformed font tables
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("PDF extraction failed: {e}")),
        Err(_) => Err("PDF extraction panicked".to_string()),
    }
}

async fn embed_fragments(
    embedder: &dyn Embedder,
    fragments: &mut [Fragment],
) -> Result<(), RetrievalError> {
    for (batch_no, batch) in fragments.chunks_mut(EMBED_BATCH).enumerate() {
        let embeddings = embedder
            .embed(batch.iter().map(|f| f.content.clone()).collect())
            .await?;

        if embeddings.len() != batch.len() {
            return Err(RetrievalError::EmbeddingFailed(format!(
                "batch {batch_no}: expected {} embeddings, got {}",
                batch.len(),
                embeddings.len()
            )));
        }

        for (fragment, embedding) in batch.iter_mut().zip(embeddings) {
            fragment.embedding = Some(embedding);
        }
        debug!(batch = batch_no, size = batch.len(), "Embedded fragment batch");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::test_support::ConceptEmbedder;
    use tempfile::TempDir;
    use upskiller_core::ResourceStore;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn config(root: &Path) -> IngestConfig {
        IngestConfig {
            root: root.to_path_buf(),
            chunk_size: 60,
            chunk_overlap: 10,
            ..IngestConfig::default()
        }
    }

    #[test]
    fn collects_text_files_and_skips_missing_folders() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Job Descriptions/manager.txt", "Owns inbound wafer logistics.");
        write(dir.path(), "Industry Reports/2025/outlook.md", "Capacity expands in Arizona.");
        write(dir.path(), "Industry Reports/chart.png", "not text");

        let (fragments, report) = Ingestor::new(config(dir.path())).collect();

        assert_eq!(report.files, 2);
        assert_eq!(report.fragments, 2);
        assert_eq!(report.skipped_folders, vec!["Training Curricula".to_string()]);

        let report_fragment = fragments
            .iter()
            .find(|f| f.provenance.folder == "Industry Reports")
            .unwrap();
        assert!(report_fragment.provenance.file.ends_with("outlook.md"));
        assert_eq!(report_fragment.provenance.chunk_index, 0);
    }

    #[test]
    fn long_documents_are_chunked() {
        let dir = TempDir::new().unwrap();
        let body = "Predictive maintenance reduces unplanned tool downtime. ".repeat(10);
        write(dir.path(), "Training Curricula/pm.txt", &body);

        let (fragments, report) = Ingestor::new(config(dir.path())).collect();
        assert_eq!(report.files, 1);
        assert!(fragments.len() > 1);
        assert!(fragments.iter().all(|f| f.content.chars().count() <= 60));
        let indices: Vec<_> = fragments.iter().map(|f| f.provenance.chunk_index).collect();
        assert_eq!(indices, (0..fragments.len()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn run_writes_store_with_embeddings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Job Descriptions/analyst.txt", "Builds demand forecasts.");
        let store_path = dir.path().join("store").join("fragments.jsonl");
        let store = JsonlStore::open_or_create(&store_path);

        let report = Ingestor::new(config(dir.path()))
            .with_embedder(Arc::new(ConceptEmbedder))
            .run(&store)
            .await
            .unwrap();

        assert!(report.embedded);
        assert_eq!(report.fragments, 1);

        let reopened = JsonlStore::open(&store_path).unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        let raw = std::fs::read_to_string(&store_path).unwrap();
        assert!(raw.contains("\"embedding\""));
        assert!(raw.contains("Job Descriptions"));
    }

    #[test]
    fn unreadable_pdf_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Industry Reports/scan.pdf", "this is not a PDF");
        write(dir.path(), "Industry Reports/notes.md", "Tariffs on gallium exports.");

        let (fragments, report) = Ingestor::new(config(dir.path())).collect();

        assert_eq!(report.files, 1);
        assert_eq!(report.skipped_files, 1);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].provenance.file, "notes.md");
    }

    #[test]
    fn pdf_is_a_default_extension() {
        let dir = TempDir::new().unwrap();
        let ingestor = Ingestor::new(config(dir.path()));
        assert!(ingestor.has_wanted_extension(Path::new("report.PDF")));
        assert!(!ingestor.has_wanted_extension(Path::new("chart.png")));
    }
}
