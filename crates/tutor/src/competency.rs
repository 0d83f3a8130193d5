//! Competency profile derived from role and literacy level.
//!
//! A simple heuristic: the literacy level is the baseline, and each role is
//! stronger or weaker on some axes. Values are clamped to 0..=5.

use upskiller_core::{JobRole, LiteracyLevel};

pub const RADAR_AXES: [&str; 5] = [
    "Data Literacy",
    "Logistics Ops",
    "AI Strategy",
    "Safety",
    "Procurement",
];

const MAX_SCORE: i16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyProfile {
    /// One value per entry of [`RADAR_AXES`]
    pub radar: [u8; 5],
    /// The role's headline skills, as shown in the career report
    pub gaps: Vec<(&'static str, u8)>,
}

fn clamp(value: i16) -> u8 {
    value.clamp(0, MAX_SCORE) as u8
}

impl CompetencyProfile {
    pub fn for_learner(role: JobRole, level: LiteracyLevel) -> Self {
        let b = i16::from(level.get());

        let (offsets, gaps): ([i16; 5], Vec<(&'static str, i16)>) = match role {
            JobRole::LogisticsManager => (
                [0, 1, 0, 0, -1],
                vec![("Logistics Ops", b + 1), ("Procurement", b - 1)],
            ),
            JobRole::SupplyChainAnalyst => (
                [2, 0, 1, -1, 0],
                vec![("Data Literacy", b + 2), ("AI Strategy", b + 1)],
            ),
            _ => ([0; 5], vec![("General Operations", b)]),
        };

        Self {
            radar: offsets.map(|o| clamp(b + o)),
            gaps: gaps.into_iter().map(|(name, v)| (name, clamp(v))).collect(),
        }
    }

    /// Axis names paired with values.
    pub fn axes(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        RADAR_AXES.iter().copied().zip(self.radar.iter().copied())
    }

    /// A terminal rendering of the radar as horizontal bars.
    pub fn render_bars(&self) -> String {
        let width = RADAR_AXES.iter().map(|a| a.len()).max().unwrap_or(0);
        self.axes()
            .map(|(axis, value)| {
                let filled = usize::from(value);
                format!(
                    "{axis:<width$}  {}{}  {value}/5",
                    "█".repeat(filled),
                    "░".repeat(5 - filled)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
