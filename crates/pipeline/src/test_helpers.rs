//! Shared test helpers for pipeline tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use upskiller_core::error::{ProviderError, RetrievalError};
use upskiller_core::provider::{StreamChunk, Usage};
use upskiller_core::{
    Fragment, FragmentQuery, Message, Provenance, Provider, ProviderRequest, ProviderResponse,
    ResourceStore, SearchFailure, SearchResult, WebSearch,
};

// ── Provider ──────────────────────────────────────────────────────────────

enum Script {
    Chunks(Vec<String>),
    Interrupted(Vec<String>),
    Refuse,
}

/// A provider that streams scripted chunks and records what it was sent.
pub struct ScriptedProvider {
    script: Script,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn chunks(chunks: &[&str]) -> Self {
        Self::with_script(Script::Chunks(chunks.iter().map(|c| c.to_string()).collect()))
    }

    /// Streams `chunks`, then fails mid-stream.
    pub fn interrupted(chunks: &[&str]) -> Self {
        Self::with_script(Script::Interrupted(chunks.iter().map(|c| c.to_string()).collect()))
    }

    /// Rejects every request before streaming starts.
    pub fn refusing() -> Self {
        Self::with_script(Script::Refuse)
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

fn text_chunk(text: &str) -> StreamChunk {
    StreamChunk {
        content: Some(text.to_string()),
        done: false,
        usage: None,
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match &self.script {
            Script::Chunks(chunks) => Ok(ProviderResponse {
                message: Message::assistant(chunks.concat()),
                usage: None,
                model: "mock-model".into(),
            }),
            Script::Interrupted(_) => Err(ProviderError::StreamInterrupted("scripted".into())),
            Script::Refuse => Err(ProviderError::AuthenticationFailed("scripted".into())),
        }
    }

    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
        self.requests.lock().unwrap().push(request);

        let (tx, rx) = tokio::sync::mpsc::channel(16);
        match &self.script {
            Script::Refuse => return Err(ProviderError::AuthenticationFailed("scripted".into())),
            Script::Chunks(chunks) => {
                for c in chunks {
                    let _ = tx.send(Ok(text_chunk(c))).await;
                }
                let _ = tx
                    .send(Ok(StreamChunk {
                        content: None,
                        done: true,
                        usage: Some(Usage {
                            prompt_tokens: 10,
                            completion_tokens: 5,
                            total_tokens: 15,
                        }),
                    }))
                    .await;
            }
            Script::Interrupted(chunks) => {
                for c in chunks {
                    let _ = tx.send(Ok(text_chunk(c))).await;
                }
                let _ = tx
                    .send(Err(ProviderError::StreamInterrupted("connection reset".into())))
                    .await;
            }
        }
        Ok(rx)
    }
}

// ── Stores ────────────────────────────────────────────────────────────────

/// Returns its fragments in order, ignoring the query text.
#[derive(Clone)]
pub struct StaticStore {
    fragments: Vec<Fragment>,
    last_k: Arc<Mutex<Option<usize>>>,
}

impl StaticStore {
    pub fn with_contents(contents: &[&str]) -> Self {
        let fragments = contents
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Fragment::new(
                    *c,
                    Provenance {
                        folder: "Training Curricula".into(),
                        file: format!("module_{i}.txt"),
                        chunk_index: i,
                    },
                )
            })
            .collect();
        Self {
            fragments,
            last_k: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_k(&self) -> Option<usize> {
        *self.last_k.lock().unwrap()
    }
}

#[async_trait]
impl ResourceStore for StaticStore {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: FragmentQuery) -> Result<Vec<Fragment>, RetrievalError> {
        *self.last_k.lock().unwrap() = Some(query.k);
        Ok(self.fragments.iter().take(query.k).cloned().collect())
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.fragments.len())
    }
}

pub struct FailingStore;

#[async_trait]
impl ResourceStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: FragmentQuery) -> Result<Vec<Fragment>, RetrievalError> {
        Err(RetrievalError::Unavailable("index missing".into()))
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Err(RetrievalError::Unavailable("index missing".into()))
    }
}

// ── Web search ────────────────────────────────────────────────────────────

/// Returns a fixed outcome and records the last query it saw.
#[derive(Clone)]
pub struct StubSearch {
    outcome: Result<Vec<SearchResult>, SearchFailure>,
    last_query: Arc<Mutex<Option<String>>>,
}

impl StubSearch {
    pub fn results(results: Vec<SearchResult>) -> Self {
        Self {
            outcome: Ok(results),
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(failure: SearchFailure) -> Self {
        Self {
            outcome: Err(failure),
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for StubSearch {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchFailure> {
        *self.last_query.lock().unwrap() = Some(query.to_string());
        self.outcome
            .clone()
            .map(|mut results| {
                results.truncate(max_results);
                results
            })
    }
}
