//! The tutor: one-shot model calls behind each learning activity.
//!
//! Every activity is a single non-streaming completion whose reply is parsed
//! leniently. A provider failure is an error; an unparseable reply is not,
//! it degrades to an empty (or `None`) result the caller can present.

use std::sync::Arc;
use tracing::{debug, info};
use upskiller_core::provider::{Provider, ProviderRequest};
use upskiller_core::{JobRole, LiteracyLevel};

use crate::diagram::Diagram;
use crate::flashcards::{flashcards_prompt, parse_flashcards, Flashcard};
use crate::quiz::{parse_quiz, quiz_prompt, QuizQuestion};
use crate::scenario::{evaluation_prompt, parse_scenario, scenario_prompt, Feedback, Scenario};
use crate::skill_map::{parse_skill_map, skill_map_prompt};

pub struct Tutor {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl Tutor {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    async fn ask(&self, activity: &'static str, prompt: String) -> upskiller_core::Result<String> {
        let request = ProviderRequest::from_prompt(self.model.clone(), prompt, self.temperature);
        let response = self.provider.complete(request).await?;
        debug!(
            activity,
            provider = self.provider.name(),
            reply_len = response.message.content.len(),
            "Tutor reply received"
        );
        Ok(response.message.content)
    }

    /// Up to five multiple-choice questions. Empty when the reply had none.
    pub async fn generate_quiz(
        &self,
        role: JobRole,
        level: LiteracyLevel,
    ) -> upskiller_core::Result<Vec<QuizQuestion>> {
        let reply = self.ask("quiz", quiz_prompt(role, level)).await?;
        let questions = parse_quiz(&reply);
        info!(questions = questions.len(), %role, "Quiz generated");
        Ok(questions)
    }

    pub async fn generate_scenario(
        &self,
        role: JobRole,
        level: LiteracyLevel,
    ) -> upskiller_core::Result<Option<Scenario>> {
        let reply = self.ask("scenario", scenario_prompt(role, level)).await?;
        Ok(parse_scenario(&reply))
    }

    pub async fn evaluate_scenario(
        &self,
        scenario: &Scenario,
        response: &str,
    ) -> upskiller_core::Result<Feedback> {
        let reply = self
            .ask("scenario-feedback", evaluation_prompt(scenario, response))
            .await?;
        Ok(Feedback::new(reply.trim()))
    }

    pub async fn generate_flashcards(&self, topic: &str) -> upskiller_core::Result<Vec<Flashcard>> {
        let reply = self.ask("flashcards", flashcards_prompt(topic)).await?;
        Ok(parse_flashcards(&reply))
    }

    pub async fn generate_skill_map(&self, role: JobRole) -> upskiller_core::Result<Diagram> {
        let reply = self.ask("skill-map", skill_map_prompt(role)).await?;
        Ok(parse_skill_map(&reply))
    }
}
