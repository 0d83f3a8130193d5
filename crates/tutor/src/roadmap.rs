//! Roadmap query and post-processing of the roadmap answer.

use upskiller_core::{JobRole, LiteracyLevel};

use crate::diagram::{find_mermaid_block, sanitize, Diagram};

/// The fixed query sent through the pipeline in roadmap mode.
pub fn roadmap_query(role: JobRole, level: LiteracyLevel) -> String {
    format!(
        "Create a comprehensive learning roadmap for a {role} with AI literacy level {level} in the semiconductor industry. Include a mermaid chart."
    )
}

/// A roadmap answer split into prose and diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapParts {
    /// The answer with the mermaid block removed
    pub text: String,
    pub diagram: Option<Diagram>,
}

/// Separate the first mermaid block from the prose and sanitize it.
pub fn split_roadmap(full: &str) -> RoadmapParts {
    match find_mermaid_block(full) {
        Some(block) => RoadmapParts {
            text: full.replacen(block.fenced, "", 1),
            diagram: Some(sanitize(block.body)),
        },
        None => RoadmapParts {
            text: full.to_string(),
            diagram: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_role_and_level_specific() {
        let q = roadmap_query(JobRole::LogisticsManager, LiteracyLevel::new(2).unwrap());
        assert_eq!(
            q,
            "Create a comprehensive learning roadmap for a Logistics Manager with AI literacy level 2 in the semiconductor industry. Include a mermaid chart."
        );
    }

    #[test]
    fn diagram_is_split_out_and_sanitized() {
        let full = "| Module | Topic |\n|---|---|\n| Module 1 | Basics |\n\n```mermaid\nM1[\"Module 1 (Basics)\"] --> M2[\"Module 2\"]\n```\nGood luck!";
        let parts = split_roadmap(full);

        assert!(!parts.text.contains("```mermaid"));
        assert!(parts.text.contains("| Module 1 | Basics |"));
        assert!(parts.text.contains("Good luck!"));

        let diagram = parts.diagram.unwrap();
        assert!(diagram.as_str().starts_with("graph TD\n"));
        assert!(diagram.as_str().contains("M1[\"Module 1  - Basics\"]"));
    }

    #[test]
    fn no_diagram_keeps_text() {
        let parts = split_roadmap("Just a table");
        assert_eq!(parts.text, "Just a table");
        assert!(parts.diagram.is_none());
    }
}
