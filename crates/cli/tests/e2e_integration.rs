//! End-to-end tests for the upskiller: documents on disk through ingestion,
//! retrieval, prompt composition and a scripted model, out to tutor
//! activities and the career report.

use std::path::Path;
use std::sync::{Arc, Mutex};

use upskiller_config::IngestConfig;
use upskiller_core::error::{ProviderError, RetrievalError};
use upskiller_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use upskiller_core::{
    JobRole, LiteracyLevel, Message, Mode, ResourceStore, SearchFailure, SearchResult, WebSearch,
};
use upskiller_pipeline::{
    collect_text, AssemblerSettings, ContextAssembler, LearnerRequest, ResponsePipeline,
    WebOutcome,
};
use upskiller_store::{Ingestor, JsonlStore};
use upskiller_tutor::{grade, split_roadmap, CareerReport, Tutor};

// ── Mock Provider ────────────────────────────────────────────────────────

/// Returns scripted replies in sequence and records every prompt.
struct ScriptedProvider {
    replies: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let call = prompts.len();
        prompts.push(request.messages.last().map(|m| m.content.clone()).unwrap_or_default());

        let reply = self.replies.get(call).cloned().unwrap_or_else(|| {
            panic!("ScriptedProvider exhausted: call #{call}, have {}", self.replies.len())
        });
        Ok(ProviderResponse {
            message: Message::assistant(reply),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: request.model,
        })
    }
}

struct DownSearch;

#[async_trait::async_trait]
impl WebSearch for DownSearch {
    fn name(&self) -> &str {
        "down"
    }

    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchResult>, SearchFailure> {
        Err(SearchFailure::Status(503))
    }
}

struct NewsSearch;

#[async_trait::async_trait]
impl WebSearch for NewsSearch {
    fn name(&self) -> &str {
        "news"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchFailure> {
        let mut results = vec![SearchResult {
            title: "Fab capex outlook".into(),
            snippet: "Global fab equipment spending is set to rise.".into(),
            link: "https://example.com/capex".into(),
        }];
        results.truncate(max_results);
        Ok(results)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

fn write(root: &Path, folder: &str, file: &str, content: &str) {
    let dir = root.join(folder);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), content).unwrap();
}

fn seed_documents(root: &Path) {
    write(
        root,
        "Job Descriptions",
        "analyst.txt",
        "Supply Chain Analyst: builds demand forecasting models for wafer starts and reports forecasting accuracy weekly.",
    );
    write(
        root,
        "Training Curricula",
        "module1.md",
        "# Module 1\nPredictive maintenance for AMHS stockers using sensor data.",
    );
    write(
        root,
        "Industry Reports",
        "outlook.md",
        "Export controls on lithography tools reshape procurement lead times.",
    );
}

fn ingest_config(root: &Path) -> IngestConfig {
    IngestConfig {
        root: root.to_path_buf(),
        ..IngestConfig::default()
    }
}

async fn ingested_store(root: &Path) -> JsonlStore {
    seed_documents(root);
    let path = root.join("store").join("fragments.jsonl");
    let store = JsonlStore::open_or_create(&path);
    Ingestor::new(ingest_config(root)).run(&store).await.unwrap();
    JsonlStore::open(&path).unwrap()
}

fn level(n: u8) -> LiteracyLevel {
    LiteracyLevel::new(n).unwrap()
}

fn pipeline(
    provider: Arc<ScriptedProvider>,
    store: JsonlStore,
    search: Option<Arc<dyn WebSearch>>,
) -> ResponsePipeline {
    let assembler = ContextAssembler::new(Arc::new(store))
        .with_search(search)
        .with_settings(AssemblerSettings {
            top_k: 2,
            ..AssemblerSettings::default()
        });
    ResponsePipeline::new(provider, assembler, "mock-model", 0.2)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ingest_then_chat_grounds_the_prompt_in_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ingested_store(tmp.path()).await;
    assert_eq!(store.count().await.unwrap(), 3);

    let provider = ScriptedProvider::new(&["Use LSTM-based demand forecasting."]);
    let pipeline = pipeline(provider.clone(), store, None);

    let request = LearnerRequest::new(
        "How should I approach demand forecasting?",
        JobRole::SupplyChainAnalyst,
        level(2),
        Mode::Chat,
    );
    let response = pipeline.respond(&request).await.unwrap();
    assert!(matches!(response.context.web, WebOutcome::NotRequested));
    assert_eq!(response.context.fragments[0].provenance.folder, "Job Descriptions");

    let answer = collect_text(response.stream).await.unwrap();
    assert_eq!(answer, "Use LSTM-based demand forecasting.");

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("builds demand forecasting models for wafer starts"));
    assert!(prompt.contains("User Role: Supply Chain Analyst"));
    assert!(prompt.contains("Current Mode: chat"));
}

#[tokio::test]
async fn reingesting_replaces_the_store() {
    let tmp = tempfile::tempdir().unwrap();
    seed_documents(tmp.path());
    let path = tmp.path().join("store").join("fragments.jsonl");
    let store = JsonlStore::open_or_create(&path);
    let ingestor = Ingestor::new(ingest_config(tmp.path()));

    let first = ingestor.run(&store).await.unwrap();
    let second = ingestor.run(&store).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(JsonlStore::open(&path).unwrap().count().await.unwrap(), second.fragments);
}

#[tokio::test]
async fn missing_store_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = JsonlStore::open(tmp.path().join("nope.jsonl")).unwrap_err();
    assert!(matches!(err, RetrievalError::Unavailable(_)));
}

#[tokio::test]
async fn research_survives_a_search_outage() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ingested_store(tmp.path()).await;
    let provider = ScriptedProvider::new(&["Based on general knowledge, capex is rising."]);
    let pipeline = pipeline(provider.clone(), store, Some(Arc::new(DownSearch)));

    let request = LearnerRequest::new("fab capex", JobRole::LogisticsManager, level(3), Mode::Search);
    let response = pipeline.respond(&request).await.unwrap();
    assert!(matches!(response.context.web, WebOutcome::Failed(SearchFailure::Status(503))));

    let answer = collect_text(response.stream).await.unwrap();
    assert!(answer.starts_with("Based on general knowledge"));
    assert!(provider.prompts()[0].contains("[System: Web search failed:"));
}

#[tokio::test]
async fn research_includes_live_results() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ingested_store(tmp.path()).await;
    let provider = ScriptedProvider::new(&["| Trend | Impact |"]);
    let pipeline = pipeline(provider.clone(), store, Some(Arc::new(NewsSearch)));

    let request = LearnerRequest::new("fab capex", JobRole::ProcurementSpecialist, level(4), Mode::Search);
    let response = pipeline.respond(&request).await.unwrap();
    collect_text(response.stream).await.unwrap();

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("=== WEB SEARCH RESULTS (REAL-TIME) ==="));
    assert!(prompt.contains("Source: Fab capex outlook"));
    assert!(prompt.contains("Link: https://example.com/capex"));
}

#[tokio::test]
async fn roadmap_flows_into_the_career_report() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ingested_store(tmp.path()).await;
    let roadmap_reply = "### Phase 1\n| Module | Focus |\n|---|---|\n| **Module 1** | Forecasting (LSTM) |\n\n```mermaid\nM1[\"Module 1 (Forecasting)\"] --> M2[\"Module 2: Twins\"]\n```\n";
    let provider = ScriptedProvider::new(&[roadmap_reply]);
    let pipeline = pipeline(provider, store, None);

    let role = JobRole::SupplyChainAnalyst;
    let query = upskiller_tutor::roadmap_query(role, level(3));
    let response = pipeline
        .respond(&LearnerRequest::new(query, role, level(3), Mode::Roadmap))
        .await
        .unwrap();
    let parts = split_roadmap(&collect_text(response.stream).await.unwrap());

    let diagram = parts.diagram.unwrap();
    assert!(diagram.as_str().starts_with("graph TD\n"));
    assert!(diagram.as_str().contains("M2[\"Module 2 - Twins\"]"));

    let saved = tmp.path().join("roadmap.md");
    std::fs::write(&saved, &parts.text).unwrap();

    let report = CareerReport::new(role, level(3))
        .with_quiz_score(4)
        .with_roadmap(std::fs::read_to_string(&saved).unwrap())
        .render_markdown();

    assert!(report.contains("Make-A-Quiz Score: 4/5"));
    assert!(report.contains("| Module 1 | Forecasting (LSTM) |"));
    assert!(!report.contains("```mermaid"));
    assert!(!report.contains("###"));
}

#[tokio::test]
async fn quiz_generation_and_grading() {
    let reply = r#"Sure! ```json
[
  {"question": "Which model forecasts demand?", "options": ["LSTM", "OCR", "RPA", "NFC"], "correct_answer": 0},
  {"question": "What inspects wafers?", "options": ["Chatbots", "Computer vision", "ERP", "EDI"], "correct_answer": 1},
  {"question": "What optimizes routing?", "options": ["GAN", "TTS", "Reinforcement learning", "OCR"], "correct_answer": 2},
  {"question": "A digital twin simulates?", "options": ["Payroll", "Email", "Ads", "Fab flow"], "correct_answer": 3},
  {"question": "Predictive maintenance uses?", "options": ["Sensor data", "Logos", "Fonts", "Slides"], "correct_answer": 0}
]
```"#;
    let provider = ScriptedProvider::new(&[reply]);
    let tutor = Tutor::new(provider.clone(), "mock-model", 0.3);

    let questions = tutor
        .generate_quiz(JobRole::WarehouseSupervisor, level(2))
        .await
        .unwrap();
    assert_eq!(questions.len(), 5);
    assert!(provider.prompts()[0].contains("Warehouse Supervisor at AI literacy level 2/5"));

    let outcome = grade(&questions, &[Some(0), Some(1), Some(2), Some(3), Some(1)]);
    assert_eq!(outcome.score, 4);
    assert!(outcome.is_strong());
}
