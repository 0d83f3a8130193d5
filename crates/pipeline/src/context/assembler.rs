//! Context assembly: fragments plus (optionally) live web results.
//!
//! # Determinism
//!
//! Given the same fragments and the same web outcome, the assembled text is
//! identical: fragments are joined in store order and web results in search
//! order. Provenance never enters the text.

use std::sync::Arc;
use tracing::{debug, info, warn};
use upskiller_core::retrieval::DEFAULT_TOP_K;
use upskiller_core::{Fragment, FragmentQuery, ResourceStore, SearchFailure, SearchResult, WebSearch};

use crate::dispatch::ContextStrategy;

// ── Types ─────────────────────────────────────────────────────────────────

/// Header placed before rendered web results.
pub const WEB_RESULTS_HEADER: &str = "\n\n=== WEB SEARCH RESULTS (REAL-TIME) ===\n";

/// What happened to the web search for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebOutcome {
    /// The mode does not use web search.
    NotRequested,
    /// The search ran; the list may be empty.
    Results(Vec<SearchResult>),
    /// The search failed or no client is configured.
    Failed(SearchFailure),
}

/// The context for one request.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// The text bound into the prompt.
    pub text: String,
    /// Fragments that contributed to `text`, most relevant first.
    pub fragments: Vec<Fragment>,
    pub web: WebOutcome,
}

/// Tunables for the assembler.
#[derive(Debug, Clone)]
pub struct AssemblerSettings {
    pub top_k: usize,
    pub min_score: f32,
    pub max_results: usize,
    /// Qualifier prepended to the query before it is sent to web search
    pub query_prefix: String,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_score: 0.0,
            max_results: 3,
            query_prefix: "latest semiconductor logistics news 2024 2025".into(),
        }
    }
}

impl AssemblerSettings {
    pub fn from_config(config: &upskiller_config::AppConfig) -> Self {
        Self {
            top_k: config.retrieval.top_k,
            min_score: config.retrieval.min_score,
            max_results: config.search.max_results,
            query_prefix: config.search.query_prefix.clone(),
        }
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// Builds the context block for a request.
pub struct ContextAssembler {
    store: Arc<dyn ResourceStore>,
    search: Option<Arc<dyn WebSearch>>,
    settings: AssemblerSettings,
}

impl ContextAssembler {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            search: None,
            settings: AssemblerSettings::default(),
        }
    }

    pub fn with_search(mut self, search: Option<Arc<dyn WebSearch>>) -> Self {
        self.search = search;
        self
    }

    pub fn with_settings(mut self, settings: AssemblerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Assemble the context for `query` under `strategy`.
    ///
    /// Fails only when the store does. Web search problems are folded into
    /// the text and reported through [`WebOutcome::Failed`].
    pub async fn assemble(
        &self,
        query: &str,
        strategy: &ContextStrategy,
    ) -> upskiller_core::Result<AssembledContext> {
        let fragments = self
            .store
            .search(FragmentQuery {
                text: query.to_string(),
                k: self.settings.top_k,
                min_score: self.settings.min_score,
            })
            .await?;

        debug!(store = %self.store.name(), fragments = fragments.len(), "Fragments retrieved");

        let mut text = render_fragments(&fragments);

        let web = if strategy.web_search {
            self.search_web(query).await
        } else {
            WebOutcome::NotRequested
        };

        match &web {
            WebOutcome::NotRequested => {}
            WebOutcome::Results(results) => text.push_str(&render_web_results(results)),
            WebOutcome::Failed(failure) => text.push_str(&render_web_failure(failure)),
        }

        info!(
            mode = %strategy.mode,
            fragments = fragments.len(),
            context_len = text.len(),
            "Context assembled"
        );

        Ok(AssembledContext {
            text,
            fragments,
            web,
        })
    }

    async fn search_web(&self, query: &str) -> WebOutcome {
        let Some(search) = &self.search else {
            warn!("Web search requested but no client is configured");
            return WebOutcome::Failed(SearchFailure::NotConfigured);
        };

        let web_query = format!("{} {}", self.settings.query_prefix, query);
        match search.search(&web_query, self.settings.max_results).await {
            Ok(results) => {
                debug!(backend = %search.name(), results = results.len(), "Web search succeeded");
                WebOutcome::Results(results)
            }
            Err(failure) => {
                warn!(backend = %search.name(), error = %failure, "Web search failed, continuing without it");
                WebOutcome::Failed(failure)
            }
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────

fn render_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_web_results(results: &[SearchResult]) -> String {
    let mut out = String::from(WEB_RESULTS_HEADER);
    for r in results {
        out.push_str(&format!(
            "Source: {}\nSnippet: {}\nLink: {}\n\n",
            r.title, r.snippet, r.link
        ));
    }
    out
}

fn render_web_failure(failure: &SearchFailure) -> String {
    format!("\n[System: Web search failed: {failure}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use crate::test_helpers::{FailingStore, StaticStore, StubSearch};
    use upskiller_core::Mode;

    fn assembler(search: Option<StubSearch>) -> ContextAssembler {
        let store = StaticStore::with_contents(&["JIT replenishment cuts WIP.", "AMHS uptime targets."]);
        ContextAssembler::new(Arc::new(store))
            .with_search(search.map(|s| Arc::new(s) as Arc<dyn WebSearch>))
    }

    #[tokio::test]
    async fn chat_joins_fragments_without_web() {
        let ctx = assembler(Some(StubSearch::results(vec![])))
            .assemble("jit", &dispatch(Mode::Chat))
            .await
            .unwrap();

        assert_eq!(ctx.text, "JIT replenishment cuts WIP.\n\nAMHS uptime targets.");
        assert_eq!(ctx.web, WebOutcome::NotRequested);
        assert_eq!(ctx.fragments.len(), 2);
    }

    #[tokio::test]
    async fn provenance_never_rendered() {
        let ctx = assembler(None).assemble("jit", &dispatch(Mode::Roadmap)).await.unwrap();
        assert!(!ctx.text.contains("Training Curricula"));
        assert!(!ctx.text.contains(".txt"));
    }

    #[tokio::test]
    async fn search_mode_appends_results() {
        let search = StubSearch::results(vec![SearchResult {
            title: "Fab expansion".into(),
            snippet: "New 2nm capacity".into(),
            link: "https://news.example/fab".into(),
        }]);
        let ctx = assembler(Some(search.clone()))
            .assemble("capacity", &dispatch(Mode::Search))
            .await
            .unwrap();

        assert!(ctx.text.contains(WEB_RESULTS_HEADER));
        assert!(ctx.text.ends_with(
            "Source: Fab expansion\nSnippet: New 2nm capacity\nLink: https://news.example/fab\n\n"
        ));
        assert_eq!(
            search.last_query().as_deref(),
            Some("latest semiconductor logistics news 2024 2025 capacity")
        );
        assert!(matches!(ctx.web, WebOutcome::Results(ref r) if r.len() == 1));
    }

    #[tokio::test]
    async fn search_failure_degrades_to_marker() {
        let ctx = assembler(Some(StubSearch::failing(SearchFailure::Status(503))))
            .assemble("capacity", &dispatch(Mode::Search))
            .await
            .unwrap();

        assert!(!ctx.text.is_empty());
        assert!(ctx.text.ends_with("\n[System: Web search failed: search backend returned status 503]"));
        assert_eq!(ctx.web, WebOutcome::Failed(SearchFailure::Status(503)));
    }

    #[tokio::test]
    async fn search_failure_with_empty_store_still_has_context() {
        let assembler = ContextAssembler::new(Arc::new(StaticStore::with_contents(&[])))
            .with_search(Some(Arc::new(StubSearch::failing(SearchFailure::Transport("reset".into())))));
        let ctx = assembler.assemble("anything", &dispatch(Mode::Search)).await.unwrap();
        assert!(!ctx.text.is_empty());
    }

    #[tokio::test]
    async fn missing_client_is_reported_like_a_failure() {
        let ctx = assembler(None).assemble("capacity", &dispatch(Mode::Search)).await.unwrap();
        assert!(ctx.text.contains("[System: Web search failed: search backend not configured]"));
        assert_eq!(ctx.web, WebOutcome::Failed(SearchFailure::NotConfigured));
    }

    #[tokio::test]
    async fn empty_results_differ_only_by_header() {
        let with_empty = assembler(Some(StubSearch::results(vec![])))
            .assemble("jit", &dispatch(Mode::Search))
            .await
            .unwrap();
        let without = assembler(None).assemble("jit", &dispatch(Mode::Chat)).await.unwrap();

        assert_eq!(with_empty.text, format!("{}{}", without.text, WEB_RESULTS_HEADER));
    }

    #[tokio::test]
    async fn store_failure_is_fatal() {
        let assembler = ContextAssembler::new(Arc::new(FailingStore));
        let err = assembler.assemble("jit", &dispatch(Mode::Chat)).await.unwrap_err();
        assert!(matches!(err, upskiller_core::Error::Retrieval(_)));
    }

    #[tokio::test]
    async fn settings_control_k_and_prefix() {
        let store = StaticStore::with_contents(&["a", "b", "c", "d"]);
        let search = StubSearch::results(vec![]);
        let assembler = ContextAssembler::new(Arc::new(store.clone()))
            .with_search(Some(Arc::new(search.clone())))
            .with_settings(AssemblerSettings {
                top_k: 2,
                query_prefix: "fab news".into(),
                ..AssemblerSettings::default()
            });

        let ctx = assembler.assemble("lead times", &dispatch(Mode::Search)).await.unwrap();
        assert_eq!(ctx.fragments.len(), 2);
        assert_eq!(store.last_k(), Some(2));
        assert_eq!(search.last_query().as_deref(), Some("fab news lead times"));
    }
}
