//! File-based fragment store: persistent JSON-lines storage.
//!
//! Each line is a JSON-encoded [`Fragment`]. The file is written by the
//! ingestion step and read by every other command.
//!
//! Storage location: `~/.upskiller/store/fragments.jsonl` (configurable)

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use upskiller_core::error::RetrievalError;
use upskiller_core::{Fragment, FragmentQuery, ResourceStore};

use crate::embedding::Embedder;
use crate::keyword::keyword_search;
use crate::vector::{reciprocal_rank_fusion, vector_search, RRF_K};

/// A file-backed fragment store using JSONL (one JSON object per line).
///
/// Fragments are loaded into memory on open. Lookups rank by similarity to
/// the embedded query, with keyword matches fused in by RRF. Keyword
/// ranking alone is used only when no embedder is attached or the store
/// was ingested without embeddings.
pub struct JsonlStore {
    path: PathBuf,
    fragments: Arc<RwLock<Vec<Fragment>>>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl std::fmt::Debug for JsonlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlStore")
            .field("path", &self.path)
            .field("embedder", &self.embedder.is_some())
            .finish_non_exhaustive()
    }
}

impl JsonlStore {
    /// Open an existing store.
    ///
    /// A missing file means nothing was ingested yet, which is reported as
    /// [`RetrievalError::Unavailable`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RetrievalError> {
        let path = path.into();
        if !path.exists() {
            return Err(RetrievalError::Unavailable(format!(
                "no fragment store at {} (run `upskiller ingest` first)",
                path.display()
            )));
        }
        Ok(Self::open_or_create(path))
    }

    /// Open a store, starting empty if the file does not exist yet.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let fragments = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = fragments.len(), "Fragment store loaded");
        Self {
            path,
            fragments: Arc::new(RwLock::new(fragments)),
            embedder: None,
        }
    }

    /// Embed queries with `embedder`. It must be the one used at ingest.
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Vec<Fragment> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Fragment>(line) {
                Ok(fragment) => Some(fragment),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted fragment line");
                    None
                }
            })
            .collect()
    }

    /// Replace the whole store with `fragments` and flush to disk.
    ///
    /// Re-running ingestion therefore never duplicates fragments.
    pub async fn replace_all(&self, fragments: Vec<Fragment>) -> Result<usize, RetrievalError> {
        let count = fragments.len();
        *self.fragments.write().await = fragments;
        self.flush().await?;
        Ok(count)
    }

    async fn flush(&self) -> Result<(), RetrievalError> {
        let fragments = self.fragments.read().await;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RetrievalError::Storage(format!("Failed to create store directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for fragment in fragments.iter() {
            let line = serde_json::to_string(fragment).map_err(|e| {
                RetrievalError::Storage(format!("Failed to serialize fragment: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| RetrievalError::Storage(format!("Failed to write store file: {e}")))?;

        debug!(path = %self.path.display(), count = fragments.len(), "Fragment store flushed");
        Ok(())
    }

    async fn embed_query(&self, embedder: &dyn Embedder, text: &str) -> Result<Vec<f32>, RetrievalError> {
        embedder
            .embed(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::EmbeddingFailed("empty embedding response".into()))
    }
}

#[async_trait]
impl ResourceStore for JsonlStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn search(&self, query: FragmentQuery) -> Result<Vec<Fragment>, RetrievalError> {
        let fragments = self.fragments.read().await;

        let has_embeddings = fragments.iter().any(|f| f.embedding.is_some());
        let embedder = match &self.embedder {
            Some(e) if has_embeddings => e,
            Some(_) => {
                warn!("Store has no embeddings, re-run ingest to enable similarity ranking");
                return Ok(keyword_search(&fragments, &query.text, query.k, query.min_score));
            }
            None => return Ok(keyword_search(&fragments, &query.text, query.k, query.min_score)),
        };

        // Over-fetch both lists so fusion has something to reorder
        let pool = query.k.saturating_mul(2);
        let query_embedding = self.embed_query(embedder.as_ref(), &query.text).await?;
        let by_vector = vector_search(&fragments, &query_embedding, pool, query.min_score);
        let by_keyword = keyword_search(&fragments, &query.text, pool, 0.0);

        debug!(
            embedder = embedder.name(),
            vector = by_vector.len(),
            keyword = by_keyword.len(),
            "Hybrid fragment search"
        );

        Ok(reciprocal_rank_fusion(&by_keyword, &by_vector, RRF_K, query.k))
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.fragments.read().await.len())
    }
}
