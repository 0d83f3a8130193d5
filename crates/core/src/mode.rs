//! Operating mode of the response pipeline.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The operating variant of a request: which context sources are consulted
/// and which formatting rules enter the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Concise question answering
    #[default]
    Chat,
    /// Ten-module learning path with a diagram
    Roadmap,
    /// Knowledge base plus live web results
    Search,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Chat, Mode::Roadmap, Mode::Search];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Roadmap => "roadmap",
            Mode::Search => "search",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the three modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}' (expected chat, roadmap or search)")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "roadmap" => Ok(Mode::Roadmap),
            "search" => Ok(Mode::Search),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}
