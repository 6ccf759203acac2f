// Coalescing analyzer: recompute only when the brief actually changed

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::library::ActionLibrary;
use super::AnalysisReport;
use crate::brief::Brief;
use crate::criteria::{CriteriaCatalog, RuleEngine};

/// Per-session analyzer.
///
/// Keeps an owned snapshot of the last analysed brief and the report that
/// came out of it. A structurally equal brief returns the cached report
/// without running the rule engine again.
pub struct Analyzer {
    engine: RuleEngine,
    library: Arc<ActionLibrary>,
    max_priority_actions: usize,
    last: Option<(Brief, Arc<AnalysisReport>)>,
    runs: usize,
}

impl Analyzer {
    pub fn new(
        catalog: Arc<CriteriaCatalog>,
        library: Arc<ActionLibrary>,
        max_priority_actions: usize,
    ) -> Self {
        Self {
            engine: RuleEngine::new(catalog),
            library,
            max_priority_actions,
            last: None,
            runs: 0,
        }
    }

    /// Standard catalog and library, default priority-action limit.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(CriteriaCatalog::standard()),
            Arc::new(ActionLibrary::standard()),
            crate::config::constants::DEFAULT_MAX_PRIORITY_ACTIONS,
        )
    }

    pub fn analyze(&mut self, brief: &Brief) -> Arc<AnalysisReport> {
        if let Some((snapshot, report)) = &self.last {
            if snapshot == brief {
                tracing::debug!("Brief unchanged; reusing analysis");
                return Arc::clone(report);
            }
        }

        self.runs += 1;
        tracing::debug!(run = self.runs, fields = brief.len(), "Recomputing analysis");

        let engine = &self.engine;
        let library = self.library.as_ref();
        let limit = self.max_priority_actions;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            AnalysisReport::build(brief, engine, library, limit)
        }));

        let report = match outcome {
            Ok(report) => report,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("Analysis failed, using minimal report: {}", reason);
                AnalysisReport::fallback(library)
            }
        };

        let report = Arc::new(report);
        self.last = Some((brief.clone(), Arc::clone(&report)));
        report
    }

    /// Most recent report, if any brief has been analysed
    pub fn latest(&self) -> Option<Arc<AnalysisReport>> {
        self.last.as_ref().map(|(_, report)| Arc::clone(report))
    }

    /// How many times the rule engine actually ran
    pub fn run_count(&self) -> usize {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::BriefField;
    use crate::criteria::{CatalogEntry, Check, ImpactLevel};
    use serde_json::json;

    #[test]
    fn test_identical_brief_is_analysed_once() {
        let mut analyzer = Analyzer::standard();
        let brief = Brief::new().with("title", "Spring Refresh");
        let first = analyzer.analyze(&brief);
        let second = analyzer.analyze(&brief.clone());
        assert_eq!(analyzer.run_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_changed_brief_is_recomputed() {
        let mut analyzer = Analyzer::standard();
        analyzer.analyze(&Brief::new());
        analyzer.analyze(&Brief::new().with("summary", "Something new to score"));
        assert_eq!(analyzer.run_count(), 2);
    }

    #[test]
    fn test_key_order_does_not_force_recompute() {
        let mut analyzer = Analyzer::standard();
        let a = Brief::new().with("title", "Launch").with("summary", "Short");
        let b = Brief::new().with("summary", "Short").with("title", "Launch");
        analyzer.analyze(&a);
        analyzer.analyze(&b);
        assert_eq!(analyzer.run_count(), 1);
    }

    #[test]
    fn test_panicking_check_downgrades_to_fallback() {
        let catalog = CriteriaCatalog::with_entries(vec![CatalogEntry {
            field: BriefField::Title,
            category: "Identity",
            icon: "T",
            good_example: "Good",
            learning_tip: "tip",
            checks: vec![Check::new("boom", "Boom", ImpactLevel::High, |_| {
                panic!("predicate exploded")
            })
            .because("r", "w")],
        }]);
        let mut analyzer = Analyzer::new(
            Arc::new(catalog),
            Arc::new(ActionLibrary::standard()),
            8,
        );

        let report = analyzer.analyze(&Brief::new().with("title", json!("A real title")));
        assert!(report.degraded);
        assert!(report.health_checks.is_empty());
        assert_eq!(report.action_plan.phases.len(), 1);
        assert!(analyzer.latest().is_some());
    }
}
