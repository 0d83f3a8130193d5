//! `upskiller chat`: questions answered from the knowledge base.

use upskiller_core::Mode;

use super::{stream_to_stdout, CmdResult, LearnerArgs, Prompter, Session};

pub async fn run(learner: &LearnerArgs, message: Option<String>) -> CmdResult {
    let session = Session::load(learner)?;
    let pipeline = session.pipeline()?;

    if let Some(msg) = message {
        let response = pipeline.respond(&session.request(msg, Mode::Chat)).await?;
        stream_to_stdout(response).await?;
        return Ok(());
    }

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║     AI-Upskiller Tutor: Interactive Mode     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", session.config.default_provider);
    println!("  Model:     {}", session.config.default_model);
    println!("  Learner:   {} (AI literacy {}/5)", session.role, session.level);
    println!();
    println!("  Ask about job roles, industry reports or training curricula.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut prompter = Prompter::stdin();
    while let Some(line) = prompter.ask("  You > ").await? {
        if line.is_empty() {
            continue;
        }
        if matches!(line.as_str(), "exit" | "quit") {
            break;
        }

        println!();
        match pipeline.respond(&session.request(line, Mode::Chat)).await {
            Ok(response) => {
                if let Err(e) = stream_to_stdout(response).await {
                    eprintln!("\n  [Error] {e}");
                }
            }
            Err(e) => eprintln!("  [Error] {e}"),
        }
        println!();
    }

    println!();
    println!("  Goodbye! 👋");
    println!();
    Ok(())
}
