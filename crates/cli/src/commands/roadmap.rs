//! `upskiller roadmap`: a learning roadmap with a module diagram.

use std::path::PathBuf;
use upskiller_core::Mode;
use upskiller_tutor::{curated_resources, render_resources, roadmap_query, split_roadmap};

use super::{stream_to_stdout, CmdResult, LearnerArgs, Session};

pub async fn run(learner: &LearnerArgs, save: Option<PathBuf>) -> CmdResult {
    let session = Session::load(learner)?;
    let pipeline = session.pipeline()?;

    println!("🗺️  Roadmap for {} (AI literacy {}/5)\n", session.role, session.level);

    let query = roadmap_query(session.role, session.level);
    let response = pipeline.respond(&session.request(query, Mode::Roadmap)).await?;
    let full = stream_to_stdout(response).await?;

    let parts = split_roadmap(&full);
    match &parts.diagram {
        Some(diagram) => {
            println!("\n── Module diagram (mermaid) ──\n");
            println!("{diagram}");
        }
        None => println!("\n(no diagram in this answer)"),
    }

    println!("\n── Curated resources ──\n");
    println!("{}", render_resources(curated_resources(session.role)));

    if let Some(path) = save {
        std::fs::write(&path, &parts.text)?;
        println!("\n✅ Roadmap saved to {}", path.display());
    }

    Ok(())
}
