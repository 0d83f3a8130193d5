//! Text embedders for similarity lookup.
//!
//! Fragments are embedded at ingest time and queries at lookup time, always
//! with the same [`Embedder`]. The default is a local all-MiniLM-L6-v2 model
//! run through `fastembed`, so no API endpoint is needed.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use upskiller_config::{EmbedderKind, RetrievalConfig};
use upskiller_core::error::RetrievalError;
use upskiller_core::provider::EmbeddingRequest;
use upskiller_core::Provider;

/// Turns texts into vectors, one per input, in order.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model label, for logs.
    fn name(&self) -> &str;

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, RetrievalError>;
}

/// Embeddings from an OpenAI-compatible `/embeddings` endpoint.
pub struct ProviderEmbedder {
    provider: Arc<dyn Provider>,
    model: String,
}

impl ProviderEmbedder {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for ProviderEmbedder {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let expected = texts.len();
        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.model.clone(),
                inputs: texts,
            })
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        if response.embeddings.len() != expected {
            return Err(RetrievalError::EmbeddingFailed(format!(
                "expected {expected} embeddings, got {}",
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }
}

#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedder;

#[cfg(feature = "local-embeddings")]
mod local {
    use super::*;
    use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
    use parking_lot::Mutex;
    use std::path::PathBuf;

    pub const LOCAL_MODEL: &str = "all-MiniLM-L6-v2";

    /// all-MiniLM-L6-v2 loaded once and shared behind a mutex.
    pub struct LocalEmbedder {
        inner: Arc<Mutex<TextEmbedding>>,
    }

    impl LocalEmbedder {
        /// Load the model, downloading it into `cache_dir` on first use.
        pub fn try_new(cache_dir: PathBuf) -> Result<Self, RetrievalError> {
            let options = TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false);
            let model = TextEmbedding::try_new(options).map_err(|e| {
                RetrievalError::EmbeddingFailed(format!("failed to load {LOCAL_MODEL}: {e}"))
            })?;
            Ok(Self {
                inner: Arc::new(Mutex::new(model)),
            })
        }
    }

    #[async_trait]
    impl Embedder for LocalEmbedder {
        fn name(&self) -> &str {
            LOCAL_MODEL
        }

        async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, RetrievalError> {
            let inner = Arc::clone(&self.inner);
            tokio::task::spawn_blocking(move || {
                let mut model = inner.lock();
                model
                    .embed(texts, None)
                    .map_err(|e| RetrievalError::EmbeddingFailed(format!("fastembed inference failed: {e}")))
            })
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(format!("embedding task failed: {e}")))?
        }
    }
}

/// Build the embedder `config` asks for.
///
/// `Ok(None)` means keyword ranking only. A local model that fails to load
/// is an error, so a broken install is not silently downgraded.
pub fn from_config(
    config: &RetrievalConfig,
    provider: Option<Arc<dyn Provider>>,
) -> Result<Option<Arc<dyn Embedder>>, RetrievalError> {
    match config.embedder {
        EmbedderKind::None => Ok(None),
        EmbedderKind::Provider => {
            let provider = provider.ok_or_else(|| {
                RetrievalError::EmbeddingFailed("no provider for embeddings".into())
            })?;
            let model = config.embedding_model.clone().ok_or_else(|| {
                RetrievalError::EmbeddingFailed("retrieval.embedding_model is not set".into())
            })?;
            info!(model = %model, "Using provider embeddings");
            Ok(Some(Arc::new(ProviderEmbedder::new(provider, model))))
        }
        EmbedderKind::Local => local_from_config(config),
    }
}

#[cfg(feature = "local-embeddings")]
fn local_from_config(config: &RetrievalConfig) -> Result<Option<Arc<dyn Embedder>>, RetrievalError> {
    let embedder = LocalEmbedder::try_new(config.model_cache_dir())?;
    info!(model = local::LOCAL_MODEL, "Using local embeddings");
    Ok(Some(Arc::new(embedder)))
}

#[cfg(not(feature = "local-embeddings"))]
fn local_from_config(_config: &RetrievalConfig) -> Result<Option<Arc<dyn Embedder>>, RetrievalError> {
    tracing::warn!("Built without local-embeddings, falling back to keyword ranking");
    Ok(None)
}
