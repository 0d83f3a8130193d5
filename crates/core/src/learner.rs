//! Who the learner is: their job role and self-assessed AI literacy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The job roles the upskiller tailors its material to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobRole {
    #[default]
    LogisticsManager,
    SupplyChainAnalyst,
    WarehouseSupervisor,
    ProcurementSpecialist,
}

impl JobRole {
    pub const ALL: [JobRole; 4] = [
        JobRole::LogisticsManager,
        JobRole::SupplyChainAnalyst,
        JobRole::WarehouseSupervisor,
        JobRole::ProcurementSpecialist,
    ];

    /// Human-readable title, as used in prompts and reports.
    pub fn title(&self) -> &'static str {
        match self {
            JobRole::LogisticsManager => "Logistics Manager",
            JobRole::SupplyChainAnalyst => "Supply Chain Analyst",
            JobRole::WarehouseSupervisor => "Warehouse Supervisor",
            JobRole::ProcurementSpecialist => "Procurement Specialist",
        }
    }
}

impl std::fmt::Display for JobRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl FromStr for JobRole {
    type Err = RoleParseError;

    /// Accepts the title ("Supply Chain Analyst") or kebab-case
    /// ("supply-chain-analyst"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        JobRole::ALL
            .into_iter()
            .find(|role| role.title().to_ascii_lowercase() == normalized)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Self-assessed AI literacy on a 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LiteracyLevel(u8);

impl LiteracyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, LevelError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelError(level))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for LiteracyLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl std::fmt::Display for LiteracyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("literacy level {0} is outside 1..=5")]
pub struct LevelError(pub u8);

impl TryFrom<u8> for LiteracyLevel {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LiteracyLevel> for u8 {
    fn from(level: LiteracyLevel) -> u8 {
        level.0
    }
}
