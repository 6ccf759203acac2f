// Verbal score bands and the stricter document-level verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seven ordered verbal bands. `Ord` follows quality: `Incomplete < ... < Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    Incomplete,
    NeedsWork,
    Improvable,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

/// Lower bounds (inclusive) for each band, best first. Anything below the
/// last bound is `Incomplete`.
const BAND_THRESHOLDS: [(f64, ScoreBand); 6] = [
    (90.0, ScoreBand::Excellent),
    (80.0, ScoreBand::VeryGood),
    (70.0, ScoreBand::Good),
    (60.0, ScoreBand::Fair),
    (40.0, ScoreBand::Improvable),
    (20.0, ScoreBand::NeedsWork),
];

/// Map a percentage to its band. Monotonic; NaN maps to `Incomplete`.
pub fn map_score_to_band(percentage: f64) -> ScoreBand {
    BAND_THRESHOLDS
        .iter()
        .find(|(min, _)| percentage >= *min)
        .map(|(_, band)| *band)
        .unwrap_or(ScoreBand::Incomplete)
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::VeryGood => "very good",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Improvable => "improvable",
            ScoreBand::NeedsWork => "needs work",
            ScoreBand::Incomplete => "incomplete",
        }
    }

    /// Excellent and VeryGood; sections here get no learning tip.
    pub fn is_top_tier(self) -> bool {
        self >= ScoreBand::VeryGood
    }

    /// Incomplete and NeedsWork; these feed the Fundamentals phase.
    pub fn is_critical(self) -> bool {
        self <= ScoreBand::NeedsWork
    }

    /// Improvable, Fair and Good; these feed the Optimization phase.
    pub fn is_improvable(self) -> bool {
        (ScoreBand::Improvable..=ScoreBand::Good).contains(&self)
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Document-level verdict. Stricter than per-section banding: a brief whose
/// sections are mostly "good" usually lands on `NeedsPolish` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallAssessment {
    Incomplete,
    Weak,
    Developing,
    NeedsPolish,
    Strong,
    Outstanding,
}

impl OverallAssessment {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 95.0 => OverallAssessment::Outstanding,
            p if p >= 85.0 => OverallAssessment::Strong,
            p if p >= 70.0 => OverallAssessment::NeedsPolish,
            p if p >= 50.0 => OverallAssessment::Developing,
            p if p >= 25.0 => OverallAssessment::Weak,
            _ => OverallAssessment::Incomplete,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OverallAssessment::Outstanding => "Outstanding",
            OverallAssessment::Strong => "Strong",
            OverallAssessment::NeedsPolish => "Needs polish",
            OverallAssessment::Developing => "Developing",
            OverallAssessment::Weak => "Weak",
            OverallAssessment::Incomplete => "Incomplete",
        }
    }
}

/// How close the brief is to being handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessLevel {
    NotStarted,
    EarlyDraft,
    NeedsRevision,
    NearlyReady,
    ReadyToPresent,
}

impl ReadinessLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 92.0 => ReadinessLevel::ReadyToPresent,
            p if p >= 78.0 => ReadinessLevel::NearlyReady,
            p if p >= 55.0 => ReadinessLevel::NeedsRevision,
            p if p >= 30.0 => ReadinessLevel::EarlyDraft,
            _ => ReadinessLevel::NotStarted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadinessLevel::ReadyToPresent => "Ready to present",
            ReadinessLevel::NearlyReady => "Nearly ready",
            ReadinessLevel::NeedsRevision => "Needs revision",
            ReadinessLevel::EarlyDraft => "Early draft",
            ReadinessLevel::NotStarted => "Not started",
        }
    }
}
