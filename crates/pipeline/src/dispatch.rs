//! Mode dispatch: which context sources run and which rules enter the prompt.
//!
//! Stateless and side-effect free. The instruction fragments live in one
//! table keyed by [`Mode`], so exactly one mode's rules are ever selected.

use upskiller_core::Mode;

/// Formatting and behaviour rules for one mode.
#[derive(Debug, PartialEq, Eq)]
pub struct ModeInstructions {
    /// Mode-specific rules, rendered as bullet points.
    pub rules: &'static [&'static str],
    /// General answering rules; only conversational modes carry them.
    pub general: &'static [&'static str],
}

/// What the assembler and composer should do for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextStrategy {
    pub mode: Mode,
    /// Query the web in addition to the resource store
    pub web_search: bool,
    pub instructions: &'static ModeInstructions,
}

// ── Instruction table ─────────────────────────────────────────────────────

struct InstructionTable {
    chat: ModeInstructions,
    roadmap: ModeInstructions,
    search: ModeInstructions,
}

impl InstructionTable {
    fn get(&'static self, mode: Mode) -> &'static ModeInstructions {
        match mode {
            Mode::Chat => &self.chat,
            Mode::Roadmap => &self.roadmap,
            Mode::Search => &self.search,
        }
    }
}

static INSTRUCTIONS: InstructionTable = InstructionTable {
    chat: ModeInstructions {
        rules: &[
            "**DO NOT** generate a full learning path, curriculum, or 10-module table.",
            "**DO NOT** generate Mermaid charts.",
            "Answer the user's specific question concisely.",
            "If they ask for a full roadmap/plan, provide a brief summary of key topics (bullet points) and **explicitly tell them to use roadmap mode** for the full visual schedule.",
        ],
        general: &[
            "Answer directly and professionally.",
            "Use bullet points for list items.",
            "Cite internal knowledge if context is missing.",
        ],
    },
    roadmap: ModeInstructions {
        rules: &[
            "**FORCE FORMATTING**: Output a valid Markdown table for the Training Path.",
            "**IGNORE** original module numbers. RENUMBER from Module 1 to Module 10.",
            "**STRICT LIMIT**: Exactly 10 distinct modules.",
            "**INCLUDE** a Mermaid chart (using graph TD, no parens in labels).",
        ],
        general: &[],
    },
    search: ModeInstructions {
        rules: &[
            "Incorporate the provided web search results into your answer.",
            "Cite the web sources where appropriate.",
            "Focus on recent trends (2024-2025).",
        ],
        general: &[],
    },
};

/// Select the strategy for `mode`.
pub fn dispatch(mode: Mode) -> ContextStrategy {
    ContextStrategy {
        mode,
        web_search: mode == Mode::Search,
        instructions: INSTRUCTIONS.get(mode),
    }
}
