//! Career development report.
//!
//! The report is Markdown so it can be written to disk as-is or converted
//! by any downstream tool.

use chrono::{DateTime, Utc};
use upskiller_core::{JobRole, LiteracyLevel};

use crate::competency::CompetencyProfile;

/// Roadmap text beyond this many characters is cut and marked with "...".
pub const ROADMAP_EXCERPT_CHARS: usize = 2000;

const NO_ROADMAP: &str = "No roadmap generated yet. Run `upskiller roadmap --save <file>` first.";

#[derive(Debug, Clone)]
pub struct CareerReport {
    pub role: JobRole,
    pub level: LiteracyLevel,
    pub quiz_score: Option<u32>,
    pub roadmap: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl CareerReport {
    pub fn new(role: JobRole, level: LiteracyLevel) -> Self {
        Self {
            role,
            level,
            quiz_score: None,
            roadmap: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_quiz_score(mut self, score: u32) -> Self {
        self.quiz_score = Some(score);
        self
    }

    pub fn with_roadmap(mut self, roadmap: impl Into<String>) -> Self {
        self.roadmap = Some(roadmap.into());
        self
    }

    pub fn render_markdown(&self) -> String {
        let profile = CompetencyProfile::for_learner(self.role, self.level);
        let mut out = String::new();

        out.push_str("# Career Development Report\n\n");
        out.push_str(&format!(
            "_Generated {}_\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        out.push_str("## 1. Professional Profile\n\n");
        out.push_str(&format!("- Target Role: {}\n", self.role));
        out.push_str(&format!("- Current AI Literacy Level: {}/5\n\n", self.level));

        out.push_str("## 2. Competency Gap Analysis\n\n");
        for (skill, value) in &profile.gaps {
            out.push_str(&format!("- {skill}: Level {value}/5\n"));
        }
        out.push('\n');

        out.push_str("## 3. Quiz Performance\n\n");
        match self.quiz_score {
            Some(score) => out.push_str(&format!("Make-A-Quiz Score: {score}/5\n\n")),
            None => out.push_str("No quiz attempted yet.\n\n"),
        }

        out.push_str("## 4. Recommended Action Plan\n\n");
        match self.roadmap.as_deref() {
            Some(roadmap) => out.push_str(&roadmap_excerpt(roadmap)),
            None => out.push_str(NO_ROADMAP),
        }
        out.push('\n');

        out
    }
}

/// Strip heading and bold markers and cut to [`ROADMAP_EXCERPT_CHARS`].
pub fn roadmap_excerpt(roadmap: &str) -> String {
    let plain = roadmap.replace("**", "").replace("###", "");
    let plain = plain.trim();

    match plain.char_indices().nth(ROADMAP_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &plain[..cut]),
        None => plain.to_string(),
    }
}
