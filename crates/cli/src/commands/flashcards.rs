//! `upskiller flashcards`

use super::{CmdResult, LearnerArgs, Session};

pub async fn run(topic: &str) -> CmdResult {
    let session = Session::load(&LearnerArgs { role: None, level: None })?;
    let cards = session.tutor().generate_flashcards(topic).await?;

    if cards.is_empty() {
        println!("No flashcards could be read from the model reply. Please try again.");
        return Ok(());
    }

    println!("🃏 {topic}\n");
    for card in &cards {
        println!("  {}", card.term);
        println!("    {}\n", card.definition);
    }
    Ok(())
}
