//! `upskiller scenario`: fab crisis role-play.

use upskiller_tutor::Verdict;

use super::{CmdResult, LearnerArgs, Prompter, Session};

pub async fn run(learner: &LearnerArgs) -> CmdResult {
    let session = Session::load(learner)?;
    let tutor = session.tutor();

    println!("🚨 Fab crisis simulation for a {}\n", session.role);
    let Some(scenario) = tutor.generate_scenario(session.role, session.level).await? else {
        println!("Could not generate a scenario from the model reply. Please try again.");
        return Ok(());
    };

    println!("Scenario:\n  {}\n", scenario.scenario);
    println!("Question:\n  {}\n", scenario.question);

    let mut prompter = Prompter::stdin();
    let response = match prompter.ask("Your response > ").await? {
        Some(r) if !r.is_empty() => r,
        _ => {
            println!("No response given.");
            return Ok(());
        }
    };

    println!("\n⏳ Supervisor is reviewing...\n");
    let feedback = tutor.evaluate_scenario(&scenario, &response).await?;
    let badge = match feedback.verdict() {
        Some(Verdict::Pass) => "✅ PASS",
        Some(Verdict::Fail) => "❌ FAIL",
        None => "📋 FEEDBACK",
    };
    println!("{badge}\n{}", feedback.text);

    Ok(())
}
