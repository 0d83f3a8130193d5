//! Fab crisis role-play: scenario generation and supervisor feedback.

use serde::{Deserialize, Serialize};
use upskiller_core::{JobRole, LiteracyLevel};

use crate::extract::parse_lenient;

/// A crisis scenario and the question put to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario: String,
    pub question: String,
}

pub fn scenario_prompt(role: JobRole, level: LiteracyLevel) -> String {
    format!(
        "Create a realistic \"Crisis Scenario\" for a {role} in a semiconductor fab supply chain.\n\
         The user has AI Literacy Level {level}/5.\n\
         \n\
         Output strictly a JSON object with:\n\
         1. \"scenario\": A clear paragraph describing the emergency (e.g., machine down, logistics delay).\n\
         2. \"question\": A challenging question asking the user what AI tool or strategy they would use.\n\
         \n\
         Do not include markdown code blocks.\n"
    )
}

/// Parse a scenario reply. `None` means the caller should try again.
pub fn parse_scenario(raw: &str) -> Option<Scenario> {
    parse_lenient::<Scenario>(raw)
        .filter(|s| !s.scenario.trim().is_empty() && !s.question.trim().is_empty())
}

pub fn evaluation_prompt(scenario: &Scenario, response: &str) -> String {
    format!(
        "Scenario: {}\n\
         Question: {}\n\
         User Response: {response}\n\
         \n\
         Act as a senior supervisor. Specific instructions:\n\
         1. Grade the response (Pass/Fail).\n\
         2. Explain WHY based on semiconductor industry standards (JIT, predictive maintenance, etc.).\n\
         3. Keep it brief (3-4 sentences).\n",
        scenario.scenario, scenario.question
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// The supervisor's free-text evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
}

impl Feedback {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The grade, if the text states one. The first of "pass"/"fail" to
    /// appear as a whole word wins.
    pub fn verdict(&self) -> Option<Verdict> {
        self.text
            .split(|c: char| !c.is_alphanumeric())
            .find_map(|word| match word.to_ascii_lowercase().as_str() {
                "pass" | "passed" => Some(Verdict::Pass),
                "fail" | "failed" => Some(Verdict::Fail),
                _ => None,
            })
    }
}
