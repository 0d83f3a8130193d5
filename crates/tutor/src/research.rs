//! Preset research questions for search mode.

use std::str::FromStr;
use upskiller_core::JobRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchTopic {
    /// Market trends and forecasts
    Market,
    /// Supply chain disruptions and risks
    Risks,
    /// AI tools for the learner's role
    Tools,
}

impl ResearchTopic {
    pub const ALL: [ResearchTopic; 3] = [Self::Market, Self::Risks, Self::Tools];

    /// The name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Risks => "risks",
            Self::Tools => "tools",
        }
    }

    pub fn query(&self, role: JobRole) -> String {
        match self {
            Self::Market => "Latest global semiconductor market trends and forecasts 2025".into(),
            Self::Risks => "Current semiconductor supply chain disruptions and risks 2025".into(),
            Self::Tools => format!("Top AI tools and software for {role} in 2025"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown research topic '{0}' (expected market, risks or tools)")]
pub struct TopicParseError(pub String);

impl FromStr for ResearchTopic {
    type Err = TopicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "risks" | "risk" => Ok(Self::Risks),
            "tools" => Ok(Self::Tools),
            _ => Err(TopicParseError(s.to_string())),
        }
    }
}
