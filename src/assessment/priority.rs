// Priority actions: the short "do these next" list

use serde::Serialize;
use std::collections::HashSet;

use super::library::{ActionLibrary, LibraryAction};
use super::plan::Priority;
use crate::brief::BriefField;
use crate::criteria::HealthCheck;

/// Below this aggregate the fundamental actions are offered
pub const FUNDAMENTALS_BELOW: f64 = 50.0;
/// At or above this aggregate the advanced actions are offered
pub const ADVANCED_FROM: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<BriefField>,
}

impl PriorityAction {
    fn from_library(action: &LibraryAction, priority: Priority, section: Option<BriefField>) -> Self {
        Self {
            id: action.id.clone(),
            title: action.title.clone(),
            description: action.description.clone(),
            priority,
            minutes: action.minutes,
            section,
        }
    }
}

pub fn generate_priority_actions(
    checks: &[HealthCheck],
    aggregate: f64,
    library: &ActionLibrary,
    limit: usize,
) -> Vec<PriorityAction> {
    let mut actions = Vec::new();

    for check in checks.iter().filter(|c| !c.score.is_top_tier()) {
        let Some(section) = library.section(check.field) else {
            continue;
        };
        let (specific, priority) = if check.score.is_critical() {
            (&section.critical, Priority::High)
        } else {
            (&section.improvement, Priority::Medium)
        };
        actions.push(PriorityAction::from_library(specific, priority, Some(check.field)));
        actions.push(PriorityAction::from_library(&section.general, Priority::Low, Some(check.field)));
    }

    if aggregate < FUNDAMENTALS_BELOW {
        actions.extend(
            library
                .fundamentals
                .iter()
                .map(|a| PriorityAction::from_library(a, Priority::High, None)),
        );
    }
    if aggregate >= ADVANCED_FROM {
        actions.extend(
            library
                .advanced
                .iter()
                .map(|a| PriorityAction::from_library(a, Priority::Medium, None)),
        );
    }

    // Vec::sort_by_key is stable: ties keep section order
    actions.sort_by_key(|a| a.priority);

    let mut seen = HashSet::new();
    actions.retain(|a| seen.insert(a.id.clone()));
    actions.truncate(limit);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::Brief;
    use crate::criteria::{CriteriaCatalog, RuleEngine};
    use std::sync::Arc;

    fn empty_checks() -> Vec<HealthCheck> {
        RuleEngine::new(Arc::new(CriteriaCatalog::standard())).evaluate(&Brief::new())
    }

    #[test]
    fn test_weak_brief_gets_critical_actions_first() {
        let library = ActionLibrary::standard();
        let actions = generate_priority_actions(&empty_checks(), 0.0, &library, 8);
        assert_eq!(actions.len(), 8);
        assert!(actions.iter().all(|a| a.priority == Priority::High));
        // Sections keep canonical order after the stable sort
        assert_eq!(actions[0].id, "title-critical");
        assert_eq!(actions[1].id, "summary-critical");
    }

    #[test]
    fn test_fundamentals_included_below_threshold() {
        let library = ActionLibrary::standard();
        let actions = generate_priority_actions(&empty_checks(), 10.0, &library, 100);
        assert!(actions.iter().any(|a| a.id == "fundamental-core-story"));
        assert!(!actions.iter().any(|a| a.id.starts_with("advanced-")));
    }

    #[test]
    fn test_advanced_only_when_strong() {
        let library = ActionLibrary::standard();
        let actions = generate_priority_actions(&[], 85.0, &library, 8);
        let ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["advanced-message-test", "advanced-scenario-plan"]);
    }

    #[test]
    fn test_ids_are_unique_and_limit_respected() {
        let library = ActionLibrary::standard();
        let mut checks = empty_checks();
        checks.extend(empty_checks());
        let actions = generate_priority_actions(&checks, 0.0, &library, 1000);
        let unique: HashSet<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unique.len(), actions.len());
        // 16 sections × (critical + general) + 2 fundamentals
        assert_eq!(actions.len(), 34);

        assert!(generate_priority_actions(&checks, 0.0, &library, 0).is_empty());
    }

    #[test]
    fn test_mid_range_brief_gets_neither_extra() {
        let library = ActionLibrary::standard();
        let actions = generate_priority_actions(&[], 65.0, &library, 8);
        assert!(actions.is_empty());
    }
}
