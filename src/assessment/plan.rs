// Phased action plan synthesis

use serde::Serialize;

use super::bands::ScoreBand;
use super::library::{ActionLibrary, PolishTask};
use crate::brief::BriefField;
use crate::criteria::{Difficulty, HealthCheck, ImpactLevel};

/// Expected improvement credited per weak section, in percentage points
pub const IMPROVEMENT_PER_WEAK_SECTION: f64 = 8.0;

const PHASE_BASE_MINUTES: u32 = 15;
const PHASE_MINUTES_PER_TASK: u32 = 20;
const PHASE_MIN_MINUTES: u32 = 20;
const PHASE_MAX_MINUTES: u32 = 180;

/// `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedTask {
    pub title: String,
    /// `None` for document-wide tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<BriefField>,
    pub checklist: Vec<String>,
    pub resources: Vec<String>,
    pub success_criteria: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Phase {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub minutes: u32,
    pub difficulty: Difficulty,
    pub expected_impact: ImpactLevel,
    pub tasks: Vec<DetailedTask>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionPlan {
    pub summary: String,
    pub total_minutes: u32,
    pub difficulty: Difficulty,
    pub expected_improvement: f64,
    pub phases: Vec<Phase>,
}

impl ActionPlan {
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Human-readable total, e.g. "1h 35m"
    pub fn time_estimate(&self) -> String {
        format_minutes(self.total_minutes)
    }
}

pub fn phase_minutes(task_count: usize) -> u32 {
    let raw = PHASE_BASE_MINUTES.saturating_add(PHASE_MINUTES_PER_TASK.saturating_mul(task_count as u32));
    raw.clamp(PHASE_MIN_MINUTES, PHASE_MAX_MINUTES)
}

pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Build the phased plan from evaluated sections.
///
/// Fundamentals and Optimization appear only when they have tasks; Final
/// Polish is always present, so the plan is never empty.
pub fn generate_action_plan(
    checks: &[HealthCheck],
    aggregate: f64,
    library: &ActionLibrary,
) -> ActionPlan {
    let critical: Vec<&HealthCheck> = checks.iter().filter(|c| c.score.is_critical()).collect();
    let improvable: Vec<&HealthCheck> = checks.iter().filter(|c| c.score.is_improvable()).collect();

    let mut phases = Vec::with_capacity(3);

    if !critical.is_empty() {
        let tasks: Vec<DetailedTask> = critical
            .iter()
            .map(|c| section_task(c, library, ScoreBand::Good))
            .collect();
        phases.push(Phase {
            id: "fundamentals".to_string(),
            title: "Fundamentals".to_string(),
            priority: Priority::High,
            minutes: phase_minutes(tasks.len()),
            difficulty: Difficulty::Medium,
            expected_impact: ImpactLevel::High,
            tasks,
        });
    }

    if !improvable.is_empty() {
        let tasks: Vec<DetailedTask> = improvable
            .iter()
            .map(|c| section_task(c, library, ScoreBand::VeryGood))
            .collect();
        phases.push(Phase {
            id: "optimization".to_string(),
            title: "Optimization".to_string(),
            priority: Priority::Medium,
            minutes: phase_minutes(tasks.len()),
            difficulty: Difficulty::Easy,
            expected_impact: ImpactLevel::Medium,
            tasks,
        });
    }

    phases.push(final_polish(&library.polish));

    let weak = critical.len() + improvable.len();
    let expected_improvement =
        (100.0 - aggregate).min(weak as f64 * IMPROVEMENT_PER_WEAK_SECTION).max(0.0);
    let total_minutes = phases.iter().map(|p| p.minutes).sum();

    let difficulty = match critical.len() {
        0 => Difficulty::Easy,
        1..=4 => Difficulty::Medium,
        _ => Difficulty::Hard,
    };

    let summary = match (critical.len(), improvable.len()) {
        (0, 0) => "Every section is in good shape; a final polish pass is all that remains.".to_string(),
        (0, i) => format!("{i} section(s) could be sharpened before a final polish."),
        (c, 0) => format!("{c} section(s) are missing or thin; fill them in, then polish."),
        (c, i) => format!(
            "{c} section(s) are missing or thin and {i} more could be sharpened."
        ),
    };

    ActionPlan {
        summary,
        total_minutes,
        difficulty,
        expected_improvement,
        phases,
    }
}

fn section_task(check: &HealthCheck, library: &ActionLibrary, target: ScoreBand) -> DetailedTask {
    let section = library.section(check.field);

    let title = section
        .map(|s| s.task_title.clone())
        .unwrap_or_else(|| format!("Improve {}", check.field.label()));

    let checklist: Vec<String> = check
        .failed_insights()
        .map(|i| match &i.quick_win {
            Some(win) => win.action.to_string(),
            None => i.title.clone(),
        })
        .collect();

    let mut resources = Vec::new();
    if let Some(example) = check.insights.first().map(|i| &i.good_example) {
        resources.push(format!("Example: {example}"));
    }
    if let Some(tip) = &check.learning_tip {
        resources.push(format!("Tip: {tip}"));
    }

    DetailedTask {
        title,
        section: Some(check.field),
        checklist,
        resources,
        success_criteria: format!(
            "{} reaches at least \"{}\"",
            check.field.label(),
            target.label()
        ),
    }
}

fn final_polish(polish: &[PolishTask]) -> Phase {
    let tasks: Vec<DetailedTask> = polish
        .iter()
        .map(|t| DetailedTask {
            title: t.title.clone(),
            section: None,
            checklist: t.checklist.clone(),
            resources: Vec::new(),
            success_criteria: t.success_criteria.clone(),
        })
        .collect();

    Phase {
        id: "final-polish".to_string(),
        title: "Final Polish".to_string(),
        priority: Priority::Low,
        minutes: phase_minutes(tasks.len()),
        difficulty: Difficulty::Easy,
        expected_impact: ImpactLevel::Low,
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::Brief;
    use crate::criteria::{CriteriaCatalog, RuleEngine};
    use serde_json::json;
    use std::sync::Arc;

    fn evaluate(brief: &Brief) -> Vec<HealthCheck> {
        RuleEngine::new(Arc::new(CriteriaCatalog::standard())).evaluate(brief)
    }

    #[test]
    fn test_phase_minutes_clamped() {
        assert_eq!(phase_minutes(0), 20);
        assert_eq!(phase_minutes(1), 35);
        assert_eq!(phase_minutes(3), 75);
        assert_eq!(phase_minutes(16), 180);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(95), "1h 35m");
    }

    #[test]
    fn test_empty_checks_yield_only_final_polish() {
        let library = ActionLibrary::standard();
        let plan = generate_action_plan(&[], 0.0, &library);
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].title, "Final Polish");
        assert_eq!(plan.expected_improvement, 0.0);
        assert!(!plan.phases[0].tasks.is_empty());
    }

    #[test]
    fn test_empty_brief_goes_to_fundamentals() {
        let library = ActionLibrary::standard();
        let checks = evaluate(&Brief::new());
        let plan = generate_action_plan(&checks, 0.0, &library);

        let ids: Vec<&str> = plan.phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["fundamentals", "final-polish"]);

        let fundamentals = plan.phase("fundamentals").unwrap();
        assert_eq!(fundamentals.tasks.len(), 16);
        assert_eq!(fundamentals.minutes, 180);
        assert_eq!(fundamentals.priority, Priority::High);
        assert_eq!(plan.difficulty, Difficulty::Hard);
        // 16 weak sections × 8 caps at the 100-point headroom
        assert_eq!(plan.expected_improvement, 100.0);
    }

    #[test]
    fn test_phases_are_never_empty() {
        let library = ActionLibrary::standard();
        let brief = Brief::new()
            .with("title", "Spring Refresh 2025: win back lapsed subscribers")
            .with("objectives", json!(["Grow sign-ups"]));
        let checks = evaluate(&brief);
        let plan = generate_action_plan(&checks, 10.0, &library);
        assert!(plan.phases.iter().all(|p| !p.tasks.is_empty()));
        assert_eq!(plan.phases.last().unwrap().title, "Final Polish");
    }

    #[test]
    fn test_task_checklist_comes_from_failed_checks() {
        let library = ActionLibrary::standard();
        let checks = evaluate(&Brief::new());
        let plan = generate_action_plan(&checks, 0.0, &library);
        let task = plan
            .phase("fundamentals")
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.section == Some(BriefField::TargetAudience))
            .unwrap();
        assert_eq!(task.title, "Define your target audience");
        let audience = checks.iter().find(|c| c.field == BriefField::TargetAudience).unwrap();
        assert_eq!(task.checklist.len(), audience.insights.len());
        assert!(task.resources.iter().any(|r| r.starts_with("Example:")));
        assert!(task.success_criteria.contains("good"));
    }

    #[test]
    fn test_expected_improvement_bounded_by_headroom() {
        let library = ActionLibrary::standard();
        let checks = evaluate(&Brief::new());
        let plan = generate_action_plan(&checks, 95.0, &library);
        assert_eq!(plan.expected_improvement, 5.0);
        let plan = generate_action_plan(&checks, 120.0, &library);
        assert_eq!(plan.expected_improvement, 0.0);
    }
}
