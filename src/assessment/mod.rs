// Assessment aggregator
//
// Turns per-section health checks into document-level verdicts, a phased
// action plan and a short list of priority actions.

pub mod analyzer;
pub mod bands;
pub mod enrichment;
pub mod library;
pub mod plan;
pub mod priority;

pub use analyzer::Analyzer;
pub use bands::{map_score_to_band, OverallAssessment, ReadinessLevel, ScoreBand};
pub use enrichment::{local_enriched_analysis, AnalysisEnricher, AnalysisSource, EnrichedAnalysis};
pub use library::ActionLibrary;
pub use plan::{generate_action_plan, ActionPlan, DetailedTask, Phase, Priority};
pub use priority::{generate_priority_actions, PriorityAction};

use serde::Serialize;

use crate::brief::{is_brief_complete, Brief};
use crate::criteria::{HealthCheck, RuleEngine};

/// Σearned / Σmax × 100, or 0 when nothing is scored.
pub fn aggregate_percentage(checks: &[HealthCheck]) -> f64 {
    let earned: u32 = checks.iter().map(|c| c.earned).sum();
    let max: u32 = checks.iter().map(|c| c.max).sum();
    crate::criteria::percentage(earned, max)
}

/// Full result of analysing one brief revision
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub health_checks: Vec<HealthCheck>,
    pub aggregate_percentage: f64,
    pub overall: OverallAssessment,
    pub readiness: ReadinessLevel,
    pub action_plan: ActionPlan,
    pub priority_actions: Vec<PriorityAction>,
    /// No indispensable field is poor
    pub complete: bool,
    /// Produced by the fallback path after an internal failure
    pub degraded: bool,
}

impl AnalysisReport {
    pub fn build(
        brief: &Brief,
        engine: &RuleEngine,
        library: &ActionLibrary,
        max_priority_actions: usize,
    ) -> Self {
        let health_checks = engine.evaluate(brief);
        let aggregate = aggregate_percentage(&health_checks);
        let action_plan = generate_action_plan(&health_checks, aggregate, library);
        let priority_actions =
            generate_priority_actions(&health_checks, aggregate, library, max_priority_actions);

        Self {
            aggregate_percentage: aggregate,
            overall: OverallAssessment::from_percentage(aggregate),
            readiness: ReadinessLevel::from_percentage(aggregate),
            action_plan,
            priority_actions,
            complete: is_brief_complete(Some(brief)),
            degraded: false,
            health_checks,
        }
    }

    /// Minimal report used when scoring fails: no checks, Final Polish only.
    pub fn fallback(library: &ActionLibrary) -> Self {
        Self {
            health_checks: Vec::new(),
            aggregate_percentage: 0.0,
            overall: OverallAssessment::Incomplete,
            readiness: ReadinessLevel::NotStarted,
            action_plan: generate_action_plan(&[], 0.0, library),
            priority_actions: Vec::new(),
            complete: false,
            degraded: true,
        }
    }

    pub fn check(&self, field: crate::brief::BriefField) -> Option<&HealthCheck> {
        self.health_checks.iter().find(|c| c.field == field)
    }

    /// Sections that are not yet VeryGood, weakest first
    pub fn weak_sections(&self) -> Vec<&HealthCheck> {
        let mut weak: Vec<&HealthCheck> = self
            .health_checks
            .iter()
            .filter(|c| !c.score.is_top_tier())
            .collect();
        weak.sort_by_key(|c| c.score);
        weak
    }
}
