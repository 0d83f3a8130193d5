//! `upskiller skill-map`

use upskiller_tutor::CompetencyProfile;

use super::{CmdResult, LearnerArgs, Session};

pub async fn run(learner: &LearnerArgs) -> CmdResult {
    let session = Session::load(learner)?;

    println!("🕸️  Skill map for {}\n", session.role);
    let diagram = session.tutor().generate_skill_map(session.role).await?;
    println!("```mermaid\n{diagram}\n```\n");

    println!("Competency profile (AI literacy {}/5):\n", session.level);
    println!("{}", CompetencyProfile::for_learner(session.role, session.level).render_bars());
    Ok(())
}
