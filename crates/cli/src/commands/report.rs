//! `upskiller report`: Markdown career development report.

use std::path::PathBuf;
use upskiller_config::AppConfig;
use upskiller_core::LiteracyLevel;
use upskiller_tutor::CareerReport;

use super::{CmdResult, LearnerArgs};

pub async fn run(
    learner: &LearnerArgs,
    roadmap: Option<PathBuf>,
    score: Option<u32>,
    output: Option<PathBuf>,
) -> CmdResult {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let role = learner.role.unwrap_or(config.learner.role);
    let level = match learner.level {
        Some(n) => LiteracyLevel::new(n)?,
        None => config.learner.literacy_level,
    };

    let mut report = CareerReport::new(role, level);
    if let Some(score) = score {
        report = report.with_quiz_score(score);
    }
    if let Some(path) = roadmap {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read roadmap {}: {e}", path.display()))?;
        report = report.with_roadmap(text);
    }

    let markdown = report.render_markdown();
    match output {
        Some(path) => {
            std::fs::write(&path, markdown)?;
            println!("✅ Report written to {}", path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}
