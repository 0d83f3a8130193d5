//! Prompt composition.
//!
//! [`compose`] is pure: the same inputs always yield byte-identical output.
//! The prompt binds the assistant persona, the assembled context, the
//! learner profile, the mode, the query, and the rules of exactly one mode.

use std::fmt::Write as _;
use upskiller_core::{JobRole, LiteracyLevel, Mode};

use crate::dispatch::dispatch;

/// A finished prompt. Built once per request and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose the prompt for one request.
pub fn compose(
    context: &str,
    role: JobRole,
    level: LiteracyLevel,
    mode: Mode,
    query: &str,
) -> ComposedPrompt {
    let instructions = dispatch(mode).instructions;
    let mut out = String::with_capacity(context.len() + query.len() + 1024);

    // `write!` into a String cannot fail
    let _ = write!(
        out,
        "You are the \"Semiconductor Logistics AI-Upskiller\", an expert mentor.\n\
         \n\
         Context from Knowledge Base:\n\
         {context}\n\
         \n\
         User Role: {role}\n\
         AI Literacy Level: {level}/5\n\
         Current Mode: {mode}\n\
         \n\
         User Query: {query}\n\
         \n\
         Instructions:\n\
         1. Search context for competencies/standards.\n\
         \n\
         2. MODE-SPECIFIC RULES (CRITICAL) for \"{mode}\" mode:\n"
    );

    for rule in instructions.rules {
        let _ = writeln!(out, "   - {rule}");
    }

    if !instructions.general.is_empty() {
        out.push_str("\n3. General QA Rules:\n");
        for rule in instructions.general {
            let _ = writeln!(out, "   - {rule}");
        }
    }

    out.push_str("\nResponse:\n");
    ComposedPrompt(out)
}
