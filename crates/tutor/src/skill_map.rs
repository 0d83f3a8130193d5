//! Skill map: a mermaid tree of competencies for a role.

use upskiller_core::JobRole;

use crate::diagram::{extract_diagram_source, sanitize, Diagram};

pub fn skill_map_prompt(role: JobRole) -> String {
    format!(
        "Create a \"Skill Web\" for a {role} in Semiconductor Logistics using Mermaid.js syntax.\n\
         \n\
         Requirements:\n\
         - Structure: Start with central node \"{role}\" at top.\n\
         - Hierarchy: Branch into exactly 3 core categories (e.g., \"Technical\", \"Management\", \"Compliance\").\n\
         - Depth: Each category should have 2-3 sub-nodes.\n\
         - Layout: Use \"graph TD\" (Top-Down).\n\
         - Syntax Rules (CRITICAL):\n\
         \x20 - Use format: NodeID[\"Node Label\"]\n\
         \x20 - Example: A1[\"{role}\"] --> B1[\"Data Analysis\"]\n\
         \x20 - NEVER output just the ID like A1 --> B1.\n\
         - Labels: Keep labels short (1-2 words).\n\
         - IDs: Use simple alphanumerics (A, B, C...).\n"
    )
}

/// Turn a skill-map reply into a renderable diagram.
pub fn parse_skill_map(raw: &str) -> Diagram {
    sanitize(&extract_diagram_source(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_reply_is_extracted_and_sanitized() {
        let raw = "Here is the web:\n```mermaid\ngraph TD\nA[\"Supply Chain Analyst\"] --> B[\"Data (SQL)\"]\n```\nEnjoy!";
        let diagram = parse_skill_map(raw);
        assert_eq!(
            diagram.as_str(),
            "graph TD\nA[\"Supply Chain Analyst\"] --> B[\"Data  - SQL\"]"
        );
    }

    #[test]
    fn bare_reply_gets_layout() {
        let diagram = parse_skill_map("A[\"Warehouse Supervisor\"] --> B[\"Safety\"]");
        assert!(diagram.as_str().starts_with("graph TD\n"));
    }

    #[test]
    fn prompt_centres_on_role() {
        let prompt = skill_map_prompt(JobRole::WarehouseSupervisor);
        assert!(prompt.contains("central node \"Warehouse Supervisor\""));
        assert!(prompt.contains("exactly 3 core categories"));
    }
}
