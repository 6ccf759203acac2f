// Criteria rule engine
//
// A static catalog of per-section checks, and the engine that scores a brief
// against it. Everything here is deterministic and synchronous; it runs on
// every document revision.

pub mod catalog;
pub mod checks;
pub mod engine;

pub use catalog::{CatalogEntry, Check, CriteriaCatalog};
pub use engine::{RuleEngine, POINTS_PER_CHECK};

use serde::{Deserialize, Serialize};

use crate::assessment::bands::ScoreBand;
use crate::brief::BriefField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A small fix with a rough time cost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickWin {
    pub action: &'static str,
    pub minutes: u32,
    pub difficulty: Difficulty,
}

/// Outcome of one check against one section
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub explanation: String,
    pub impact: ImpactLevel,
    pub good_example: String,
    pub current_example: String,
    pub why_it_matters: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_win: Option<QuickWin>,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    Strong,
    Adequate,
    NeedsAttention,
    Critical,
}

impl From<ScoreBand> for SectionStatus {
    fn from(band: ScoreBand) -> Self {
        match band {
            ScoreBand::Excellent | ScoreBand::VeryGood => SectionStatus::Strong,
            ScoreBand::Good | ScoreBand::Fair => SectionStatus::Adequate,
            ScoreBand::Improvable => SectionStatus::NeedsAttention,
            ScoreBand::NeedsWork | ScoreBand::Incomplete => SectionStatus::Critical,
        }
    }
}

/// Evaluation of one brief section
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub field: BriefField,
    pub category: String,
    pub icon: String,
    pub score: ScoreBand,
    pub earned: u32,
    pub max: u32,
    pub status: SectionStatus,
    pub headline: String,
    pub insights: Vec<Insight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_tip: Option<String>,
}

impl HealthCheck {
    /// Percentage of available points earned, always within [0, 100].
    ///
    /// Derived on demand; `score` is the authoritative verdict.
    pub fn percentage(&self) -> f64 {
        percentage(self.earned, self.max)
    }

    pub fn failed_insights(&self) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(|i| !i.passed)
    }
}

pub(crate) fn percentage(earned: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (earned as f64 / max as f64 * 100.0).clamp(0.0, 100.0)
}
