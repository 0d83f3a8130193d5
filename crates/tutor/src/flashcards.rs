//! Flashcards of advanced terms.

use serde::{Deserialize, Serialize};

use crate::extract::parse_lenient;

pub const DEFAULT_TOPIC: &str = "Semiconductor Logistics";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

pub fn flashcards_prompt(topic: &str) -> String {
    format!(
        "Extract 5 advanced acronyms or key terms related to {topic} and AI.\n\
         Return strictly a JSON array of objects with keys: \"term\", \"definition\".\n\
         No markdown formatting.\n"
    )
}

/// Parse a flashcard reply; unparseable output yields no cards.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    parse_lenient(raw).unwrap_or_default()
}
