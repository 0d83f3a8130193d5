//! Resource store trait: similarity lookup over ingested document fragments.
//!
//! The store is built offline by the ingestion step and is read-only from
//! the response pipeline's point of view: the trait exposes lookups only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::RetrievalError;

/// A chunk of previously ingested document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Unique ID for this fragment
    pub id: String,

    /// The text content
    pub content: String,

    /// Where the text came from. Never rendered into prompts.
    #[serde(default)]
    pub provenance: Provenance,

    /// When this fragment was ingested
    pub ingested_at: DateTime<Utc>,

    /// Relevance score (set by search operations)
    #[serde(default)]
    pub score: f32,

    /// Optional embedding vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Provenance metadata of a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Source folder (e.g., "Industry Reports")
    #[serde(default)]
    pub folder: String,

    /// Source file name
    #[serde(default)]
    pub file: String,

    /// Position of the chunk within its file
    #[serde(default)]
    pub chunk_index: usize,
}

impl Fragment {
    /// Create a fragment with a fresh ID.
    pub fn new(content: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            provenance,
            ingested_at: Utc::now(),
            score: 0.0,
            embedding: None,
        }
    }
}

/// A similarity query against the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentQuery {
    /// The search text
    pub text: String,

    /// Maximum number of fragments to return
    #[serde(default = "default_k")]
    pub k: usize,

    /// Minimum relevance score threshold
    #[serde(default)]
    pub min_score: f32,
}

/// Default top-k used by the pipeline.
pub const DEFAULT_TOP_K: usize = 5;

fn default_k() -> usize {
    DEFAULT_TOP_K
}

impl FragmentQuery {
    pub fn new(text: impl Into<String>, k: usize) -> Self {
        Self {
            text: text.into(),
            k,
            min_score: 0.0,
        }
    }
}

/// The core ResourceStore trait.
///
/// Implemented by the JSONL file store; tests supply their own.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// The store name (e.g., "jsonl").
    fn name(&self) -> &str;

    /// Return up to `query.k` fragments, most relevant first.
    ///
    /// Expected to fail on connectivity or index problems; the pipeline
    /// treats any failure here as fatal for the request.
    async fn search(&self, query: FragmentQuery) -> std::result::Result<Vec<Fragment>, RetrievalError>;

    /// Total number of fragments available.
    async fn count(&self) -> std::result::Result<usize, RetrievalError>;
}
