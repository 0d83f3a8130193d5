//! `upskiller resources`: no model call, works offline.

use upskiller_config::AppConfig;
use upskiller_tutor::{curated_resources, render_resources};

use super::{CmdResult, LearnerArgs};

pub async fn run(learner: &LearnerArgs) -> CmdResult {
    let role = match learner.role {
        Some(role) => role,
        None => AppConfig::load().map(|c| c.learner.role).unwrap_or_default(),
    };

    println!("📚 Recommended resources for {role}\n");
    println!("{}", render_resources(curated_resources(role)));
    Ok(())
}
