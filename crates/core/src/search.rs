//! Web search trait: best-effort lookup of recent public information.
//!
//! A search either yields an ordered list of results (possibly empty) or a
//! structured [`SearchFailure`]. An empty list is a legitimate outcome
//! (nothing found, results filtered, provider throttling) and is never
//! reported as a failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Why a web search produced no result list at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    #[error("search backend not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("search backend returned status {0}")]
    Status(u16),

    #[error("could not decode search response: {0}")]
    Decode(String),
}

/// The core WebSearch trait.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// The backend name (e.g., "duckduckgo").
    fn name(&self) -> &str;

    /// Search the web, returning at most `max_results` hits in order.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<SearchResult>, SearchFailure>;
}
