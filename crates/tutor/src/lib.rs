//! # Upskiller Tutor
//!
//! Learning activities around the response pipeline: AI-literacy quizzes,
//! crisis role-play scenarios, flashcards, skill maps, curated resources,
//! competency profiles and the career report.
//!
//! Prompt builders and reply parsers are plain functions so they can be
//! tested without a model; [`Tutor`] wires them to a [`Provider`].
//!
//! [`Provider`]: upskiller_core::Provider

pub mod competency;
pub mod diagram;
pub mod extract;
pub mod flashcards;
pub mod generator;
pub mod quiz;
pub mod report;
pub mod research;
pub mod resources;
pub mod roadmap;
pub mod scenario;
pub mod skill_map;

pub use competency::{CompetencyProfile, RADAR_AXES};
pub use diagram::{sanitize, Diagram};
pub use flashcards::{Flashcard, DEFAULT_TOPIC};
pub use generator::Tutor;
pub use quiz::{grade, QuizOutcome, QuizQuestion, QUIZ_LENGTH};
pub use report::CareerReport;
pub use research::ResearchTopic;
pub use resources::{curated_resources, render_resources, Resource};
pub use roadmap::{roadmap_query, split_roadmap, RoadmapParts};
pub use scenario::{Feedback, Scenario, Verdict};
