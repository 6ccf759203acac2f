// Rule engine: score each brief section against the catalog

use serde_json::Value;
use std::sync::Arc;

use super::catalog::{CatalogEntry, CriteriaCatalog};
use super::{HealthCheck, Insight, SectionStatus};
use crate::assessment::bands::map_score_to_band;
use crate::brief::{Brief, BriefField, FieldShape};

/// Points awarded for each passing check
pub const POINTS_PER_CHECK: u32 = 10;

/// Max characters of the current value echoed back in an insight
const CURRENT_PREVIEW_CHARS: usize = 160;

pub struct RuleEngine {
    catalog: Arc<CriteriaCatalog>,
}

impl RuleEngine {
    pub fn new(catalog: Arc<CriteriaCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    /// Evaluate every catalog section of `brief`, in catalog order.
    pub fn evaluate(&self, brief: &Brief) -> Vec<HealthCheck> {
        self.catalog
            .entries()
            .iter()
            .map(|entry| evaluate_entry(entry, brief.field(entry.field)))
            .collect()
    }

    /// Evaluate one section. `None` if the catalog does not track `field`.
    pub fn evaluate_section(&self, field: BriefField, value: Option<&Value>) -> Option<HealthCheck> {
        self.catalog
            .entry(field)
            .map(|entry| evaluate_entry(entry, value))
    }
}

fn evaluate_entry(entry: &CatalogEntry, value: Option<&Value>) -> HealthCheck {
    // An empty section fails every check without consulting predicates
    let present = value.filter(|v| !FieldShape::of(v).is_empty());
    let current = render_current(present);

    let insights: Vec<Insight> = entry
        .checks
        .iter()
        .map(|check| {
            let passed = present.map_or(false, |v| check.passes(v));
            Insight {
                id: format!("{}-{}", entry.field.key(), check.id),
                title: check.title.to_string(),
                explanation: if passed {
                    format!("Meets the bar: {}.", check.title.to_lowercase())
                } else {
                    check.rationale.to_string()
                },
                impact: check.impact,
                good_example: entry.good_example.to_string(),
                current_example: current.clone(),
                why_it_matters: check.why_it_matters.to_string(),
                quick_win: check.quick_win.clone(),
                passed,
            }
        })
        .collect();

    let passed = insights.iter().filter(|i| i.passed).count() as u32;
    let earned = passed * POINTS_PER_CHECK;
    let max = entry.checks.len() as u32 * POINTS_PER_CHECK;
    let score = map_score_to_band(super::percentage(earned, max));

    let headline = format!(
        "{}: {} ({}/{} checks passing)",
        entry.field.label(),
        score.label(),
        passed,
        entry.checks.len()
    );

    HealthCheck {
        field: entry.field,
        category: entry.category.to_string(),
        icon: entry.icon.to_string(),
        score,
        earned,
        max,
        status: SectionStatus::from(score),
        headline,
        insights,
        learning_tip: (!score.is_top_tier()).then(|| entry.learning_tip.to_string()),
    }
}

fn render_current(value: Option<&Value>) -> String {
    let rendered = match value {
        None => return "(empty)".to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    };

    if rendered.chars().count() > CURRENT_PREVIEW_CHARS {
        let truncated: String = rendered.chars().take(CURRENT_PREVIEW_CHARS).collect();
        format!("{truncated}…")
    } else {
        rendered
    }
}
