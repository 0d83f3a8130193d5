//! `upskiller research`: market research over live web results.

use upskiller_core::Mode;
use upskiller_tutor::ResearchTopic;

use super::{stream_to_stdout, CmdResult, LearnerArgs, Session};

pub async fn run(
    learner: &LearnerArgs,
    topic: Option<ResearchTopic>,
    query: Option<String>,
) -> CmdResult {
    let session = Session::load(learner)?;

    let query = match (query, topic) {
        (Some(q), _) => q,
        (None, Some(topic)) => topic.query(session.role),
        (None, None) => {
            println!("Pick a preset with --topic or ask with -q:");
            for topic in ResearchTopic::ALL {
                println!("  {:<7} {}", topic.as_str(), topic.query(session.role));
            }
            return Ok(());
        }
    };

    let pipeline = session.pipeline()?;
    println!("🔎 {query}\n");

    let response = pipeline.respond(&session.request(query, Mode::Search)).await?;
    stream_to_stdout(response).await?;
    Ok(())
}
