//! Subcommand implementations and the wiring they share.

pub mod chat;
pub mod doctor;
pub mod flashcards;
pub mod ingest;
pub mod onboard;
pub mod quiz;
pub mod report;
pub mod research;
pub mod resources;
pub mod roadmap;
pub mod scenario;
pub mod skill_map;

use futures::StreamExt;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;
use upskiller_config::AppConfig;
use upskiller_core::{JobRole, LiteracyLevel, Provider};
use upskiller_pipeline::{
    AssemblerSettings, ContextAssembler, LearnerRequest, PipelineResponse, ResponsePipeline,
    WebOutcome,
};
use upskiller_store::{embedding, JsonlStore};
use upskiller_tutor::Tutor;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Learner overrides from the global flags.
pub struct LearnerArgs {
    pub role: Option<JobRole>,
    pub level: Option<u8>,
}

/// Everything a model-backed command needs, built once from config.
pub struct Session {
    pub config: AppConfig,
    pub provider: Arc<dyn Provider>,
    pub role: JobRole,
    pub level: LiteracyLevel,
}

impl Session {
    pub fn load(learner: &LearnerArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

        // Check for API key early, give a clear error
        if !config.has_api_key() && config.default_provider != "ollama" {
            print_missing_key_help();
            return Err("No API key found. See above for setup instructions.".into());
        }

        let router = upskiller_providers::router::build_from_config(&config);
        let provider = router.default().ok_or("No default provider configured")?;

        let role = learner.role.unwrap_or(config.learner.role);
        let level = match learner.level {
            Some(n) => LiteracyLevel::new(n)?,
            None => config.learner.literacy_level,
        };

        debug!(
            provider = %provider.name(),
            model = %config.default_model,
            %role,
            %level,
            "Session ready"
        );

        Ok(Self {
            config,
            provider,
            role,
            level,
        })
    }

    pub fn tutor(&self) -> Tutor {
        Tutor::new(
            self.provider.clone(),
            &self.config.default_model,
            self.config.default_temperature,
        )
    }

    /// Open the fragment store and wire the full response pipeline.
    pub fn pipeline(&self) -> Result<ResponsePipeline, Box<dyn std::error::Error>> {
        let mut store = JsonlStore::open(self.config.retrieval.store_path())?;
        if let Some(embedder) = embedding::from_config(&self.config.retrieval, Some(self.provider.clone()))? {
            store = store.with_embedder(embedder);
        }

        let assembler = ContextAssembler::new(Arc::new(store))
            .with_search(upskiller_search::build_from_config(&self.config.search))
            .with_settings(AssemblerSettings::from_config(&self.config));

        Ok(ResponsePipeline::new(
            self.provider.clone(),
            assembler,
            &self.config.default_model,
            self.config.default_temperature,
        )
        .with_max_tokens(self.config.default_max_tokens))
    }

    pub fn request(&self, query: impl Into<String>, mode: upskiller_core::Mode) -> LearnerRequest {
        LearnerRequest::new(query, self.role, self.level, mode)
    }
}

fn print_missing_key_help() {
    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    export GROQ_API_KEY='gsk_...'        (recommended)");
    eprintln!("    export OPENAI_API_KEY='sk-...'       (for OpenAI direct)");
    eprintln!("    export UPSKILLER_API_KEY='...'       (generic)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    eprintln!("  Get a Groq key at: https://console.groq.com/keys");
    eprintln!();
}

/// Print a streamed answer as it arrives and return the full text.
pub async fn stream_to_stdout(
    response: PipelineResponse,
) -> Result<String, Box<dyn std::error::Error>> {
    if let WebOutcome::Failed(failure) = &response.context.web {
        eprintln!("  (web search unavailable: {failure})");
    }

    let mut stream = response.stream;
    let mut full = String::new();
    let mut stdout = std::io::stdout();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("{chunk}");
        stdout.flush()?;
        full.push_str(&chunk);
    }
    println!();

    Ok(full)
}

/// Line-by-line answers from stdin.
pub struct Prompter {
    lines: tokio::io::Lines<tokio::io::BufReader<tokio::io::Stdin>>,
}

impl Prompter {
    pub fn stdin() -> Self {
        use tokio::io::AsyncBufReadExt;
        Self {
            lines: tokio::io::BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    pub async fn ask(&mut self, prompt: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }
}
