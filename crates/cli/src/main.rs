//! Upskiller CLI: the main entry point.
//!
//! Commands:
//! - `onboard`    Initialize config & workspace
//! - `doctor`     Diagnose configuration, API key and store
//! - `ingest`     Build the fragment store from local documents
//! - `chat`       Ask questions grounded in the knowledge base
//! - `roadmap`    Generate a role-specific learning roadmap
//! - `research`   Real-time market research via web search
//! - `quiz`       AI-literacy quiz
//! - `scenario`   Fab crisis role-play
//! - `flashcards` Key terms
//! - `skill-map`  Competency tree for the role
//! - `resources`  Curated courses and certifications
//! - `report`     Markdown career development report

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use upskiller_core::JobRole;

mod commands;

#[derive(Parser)]
#[command(
    name = "upskiller",
    about = "Semiconductor Logistics AI-Upskiller",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Job role (e.g. "Supply Chain Analyst"); defaults to [learner] in config
    #[arg(long, global = true, env = "UPSKILLER_ROLE")]
    role: Option<JobRole>,

    /// Self-assessed AI literacy, 1-5; defaults to [learner] in config
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=5))]
    level: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and workspace
    Onboard,

    /// Diagnose configuration, API key and fragment store
    Doctor,

    /// Load, split and store the document folders
    Ingest {
        /// Directory containing the document folders (overrides [ingest].root)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Ask the AI tutor (interactive unless --message is given)
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Generate a learning roadmap with a module diagram
    Roadmap {
        /// Also write the roadmap text to this file (input for `report`)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Real-time market research
    Research {
        /// Preset question: market, risks or tools
        #[arg(long, conflicts_with = "query")]
        topic: Option<upskiller_tutor::ResearchTopic>,

        /// Free-form research question
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Take a five-question AI-literacy quiz
    Quiz,

    /// Respond to a fab crisis scenario and get graded
    Scenario,

    /// Show flashcards of advanced terms
    Flashcards {
        #[arg(long, default_value = upskiller_tutor::DEFAULT_TOPIC)]
        topic: String,
    },

    /// Draw a skill map for the role
    SkillMap,

    /// List curated learning resources for the role
    Resources,

    /// Write a Markdown career development report
    Report {
        /// Roadmap saved with `upskiller roadmap --save`
        #[arg(long)]
        roadmap: Option<PathBuf>,

        /// Quiz score out of 5
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=5))]
        score: Option<u32>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let learner = commands::LearnerArgs {
        role: cli.role,
        level: cli.level,
    };

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Ingest { root } => commands::ingest::run(root).await?,
        Commands::Chat { message } => commands::chat::run(&learner, message).await?,
        Commands::Roadmap { save } => commands::roadmap::run(&learner, save).await?,
        Commands::Research { topic, query } => {
            commands::research::run(&learner, topic, query).await?
        }
        Commands::Quiz => commands::quiz::run(&learner).await?,
        Commands::Scenario => commands::scenario::run(&learner).await?,
        Commands::Flashcards { topic } => commands::flashcards::run(&topic).await?,
        Commands::SkillMap => commands::skill_map::run(&learner).await?,
        Commands::Resources => commands::resources::run(&learner).await?,
        Commands::Report {
            roadmap,
            score,
            output,
        } => commands::report::run(&learner, roadmap, score, output).await?,
    }

    Ok(())
}
