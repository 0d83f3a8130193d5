//! AI-literacy quiz: prompt, parsing, and grading.

use serde::{Deserialize, Serialize};
use upskiller_core::{JobRole, LiteracyLevel};

use crate::extract::parse_lenient;

/// Number of questions requested per quiz.
pub const QUIZ_LENGTH: usize = 5;

/// Options per question.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
}

impl QuizQuestion {
    /// A question is scorable when it has exactly four options and its
    /// answer indexes one of them.
    pub fn is_scorable(&self) -> bool {
        self.options.len() == OPTION_COUNT && self.correct_answer < OPTION_COUNT
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

pub fn quiz_prompt(role: JobRole, level: LiteracyLevel) -> String {
    let last = OPTION_COUNT - 1;
    format!(
        "Generate {QUIZ_LENGTH} multiple-choice questions specifically about **AI applications, tools, and digital transformation skills** for a {role} at AI literacy level {level}/5.\n\
         \n\
         The questions should NOT be about general logistics. They MUST test how AI is applied in that role (e.g., \"Which AI algorithm helps in route optimization?\", \"How does Computer Vision aid quality control?\").\n\
         \n\
         Return the result STRICTLY as a JSON array of objects.\n\
         Each object must have:\n\
         - \"question\" (string)\n\
         - \"options\" (list of {OPTION_COUNT} strings)\n\
         - \"correct_answer\" (integer index 0-{last})\n\
         \n\
         Do not include any markdown formatting like ```json or ```. Just the raw JSON array.\n"
    )
}

/// Parse a quiz reply. Unparseable output yields an empty quiz; items that
/// cannot be scored are dropped.
pub fn parse_quiz(raw: &str) -> Vec<QuizQuestion> {
    let questions: Vec<QuizQuestion> = parse_lenient(raw).unwrap_or_default();
    let total = questions.len();
    let kept: Vec<QuizQuestion> = questions.into_iter().filter(QuizQuestion::is_scorable).collect();

    if kept.len() < total {
        tracing::debug!(dropped = total - kept.len(), "Dropped unscorable quiz items");
    }
    kept
}

// ── Grading ───────────────────────────────────────────────────────────────

/// How one answer compared to the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub question: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total: u32,
    pub reviews: Vec<AnswerReview>,
}

impl QuizOutcome {
    /// Four or more right out of five counts as a strong result.
    pub fn is_strong(&self) -> bool {
        self.total > 0 && self.score * 5 >= self.total * 4
    }
}

/// Grade `answers` (option indices, `None` for skipped) against `questions`.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<usize>]) -> QuizOutcome {
    let reviews: Vec<AnswerReview> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let choice = answers.get(i).copied().flatten();
            AnswerReview {
                question: q.question.clone(),
                chosen: choice.and_then(|c| q.options.get(c).cloned()),
                correct: q.correct_option().unwrap_or_default().to_string(),
                is_correct: choice == Some(q.correct_answer),
            }
        })
        .collect();

    QuizOutcome {
        score: reviews.iter().filter(|r| r.is_correct).count() as u32,
        total: questions.len() as u32,
        reviews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE: &str = r#"```json
[
  {"question": "Which technique forecasts wafer demand?", "options": ["LSTM", "OCR", "RPA", "NFC"], "correct_answer": 0},
  {"question": "What does computer vision inspect?", "options": ["Invoices", "Reticles", "Contracts", "Emails"], "correct_answer": 1},
  {"question": "Which AI optimizes AMHS routing?", "options": ["GANs", "Sentiment", "Reinforcement learning", "TTS"], "correct_answer": 2},
  {"question": "What is a digital twin used for?", "options": ["Payroll", "Hiring", "Marketing", "Simulating fab flow"], "correct_answer": 3},
  {"question": "Predictive maintenance relies on?", "options": ["Sensor data", "Org charts", "Logos", "Fonts"], "correct_answer": 0}
]
```"#;

    #[test]
    fn fenced_five_item_quiz_parses() {
        let quiz = parse_quiz(FIVE);
        assert_eq!(quiz.len(), 5);
        assert_eq!(quiz[0].question, "Which technique forecasts wafer demand?");
        assert_eq!(quiz[2].correct_option(), Some("Reinforcement learning"));
        assert_eq!(quiz[3].options.len(), 4);
    }

    #[test]
    fn garbage_is_empty() {
        assert!(parse_quiz("I cannot help with that.").is_empty());
        assert!(parse_quiz("[{\"question\": 1}]").is_empty());
    }

    #[test]
    fn out_of_range_answers_are_dropped() {
        let raw = r#"[
            {"question": "ok", "options": ["a", "b", "c", "d"], "correct_answer": 3},
            {"question": "bad", "options": ["a", "b", "c", "d"], "correct_answer": 4}
        ]"#;
        let quiz = parse_quiz(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].question, "ok");
    }

    #[test]
    fn questions_without_four_options_are_dropped() {
        let raw = r#"[
            {"question": "two", "options": ["a", "b"], "correct_answer": 1},
            {"question": "five", "options": ["a", "b", "c", "d", "e"], "correct_answer": 0},
            {"question": "four", "options": ["a", "b", "c", "d"], "correct_answer": 1}
        ]"#;
        let quiz = parse_quiz(raw);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].question, "four");
    }

    #[test]
    fn prompt_names_role_and_level() {
        let prompt = quiz_prompt(JobRole::ProcurementSpecialist, LiteracyLevel::new(4).unwrap());
        assert!(prompt.contains("for a Procurement Specialist at AI literacy level 4/5"));
        assert!(prompt.contains("\"correct_answer\" (integer index 0-3)"));
    }

    #[test]
    fn grading_counts_and_reviews() {
        let quiz = parse_quiz(FIVE);
        let outcome = grade(&quiz, &[Some(0), Some(0), Some(2), None, Some(0)]);

        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.total, 5);
        assert!(!outcome.is_strong());
        assert_eq!(outcome.reviews[1].chosen.as_deref(), Some("Invoices"));
        assert_eq!(outcome.reviews[1].correct, "Reticles");
        assert!(outcome.reviews[3].chosen.is_none());

        let perfect = grade(&quiz, &[Some(0), Some(1), Some(2), Some(3), Some(0)]);
        assert!(perfect.is_strong());
    }
}
