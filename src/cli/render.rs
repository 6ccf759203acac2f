// Terminal rendering for reports, plans and refinement rounds

use crossterm::style::Stylize;
use std::fmt::Write;

use crate::assessment::plan::format_minutes;
use crate::assessment::{ActionPlan, AnalysisReport, EnrichedAnalysis, ScoreBand};
use crate::brief::BriefField;
use crate::criteria::SectionStatus;
use crate::refinement::{Progress, SessionState};

fn rule() -> String {
    format!("{}", "─".repeat(60).dark_grey())
}

fn band_label(band: ScoreBand) -> String {
    let label = band.label();
    match band {
        ScoreBand::Excellent | ScoreBand::VeryGood => format!("{}", label.green()),
        ScoreBand::Good | ScoreBand::Fair => format!("{}", label.cyan()),
        ScoreBand::Improvable => format!("{}", label.yellow()),
        ScoreBand::NeedsWork | ScoreBand::Incomplete => format!("{}", label.red()),
    }
}

fn status_marker(status: SectionStatus) -> String {
    match status {
        SectionStatus::Strong => format!("{}", "✓".green()),
        SectionStatus::Adequate => format!("{}", "•".cyan()),
        SectionStatus::NeedsAttention => format!("{}", "⚠".yellow()),
        SectionStatus::Critical => format!("{}", "✗".red().bold()),
    }
}

/// Section scores, verdicts and priority actions
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\n{} Brief score: {:.0}%  ·  {}  ·  {}",
        "▸".cyan().bold(),
        report.aggregate_percentage,
        report.overall.label().bold(),
        report.readiness.label()
    );
    if report.degraded {
        let _ = writeln!(out, "  {} Analysis failed; showing a minimal report.", "⚠".yellow());
    }
    let _ = writeln!(out, "{}", rule());

    for check in &report.health_checks {
        let _ = writeln!(
            out,
            "  {} {} {:<18} {:<12} {:>3}/{:<3}",
            status_marker(check.status),
            check.icon,
            check.field.label(),
            band_label(check.score),
            check.earned,
            check.max
        );
        for insight in check.failed_insights().take(2) {
            let _ = writeln!(out, "      - {}", insight.explanation.as_str().dark_grey());
        }
    }

    if !report.priority_actions.is_empty() {
        let _ = writeln!(out, "\n{} Do these next:", "▸".cyan().bold());
        for (i, action) in report.priority_actions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} ({})",
                i + 1,
                action.title.as_str().bold(),
                format_minutes(action.minutes)
            );
            let _ = writeln!(out, "     {}", action.description);
        }
    }

    out
}

pub fn render_plan(plan: &ActionPlan) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n📋 Action plan: {}", plan.summary);
    let _ = writeln!(
        out,
        "   Total {} · difficulty {} · expected +{:.0} points",
        plan.time_estimate(),
        plan.difficulty.label(),
        plan.expected_improvement
    );

    for (i, phase) in plan.phases.iter().enumerate() {
        let _ = writeln!(out, "{}", rule());
        let _ = writeln!(
            out,
            "Phase {}: {} ({}, {:?} priority)",
            i + 1,
            phase.title.as_str().bold(),
            format_minutes(phase.minutes),
            phase.priority
        );
        for task in &phase.tasks {
            let _ = writeln!(out, "  ▸ {}", task.title);
            for item in &task.checklist {
                let _ = writeln!(out, "      [ ] {}", item);
            }
            let _ = writeln!(out, "      {} {}", "Done when:".dark_grey(), task.success_criteria);
        }
    }

    out
}

pub fn render_enriched(analysis: &EnrichedAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{} Narrative analysis ({:?}): {:.0}/100",
        "▸".cyan().bold(),
        analysis.source,
        analysis.overall_score
    );

    let sections: [(&str, &Vec<String>); 4] = [
        ("Strengths", &analysis.strengths),
        ("Weaknesses", &analysis.weaknesses),
        ("Critical issues", &analysis.critical_issues),
        ("Recommendations", &analysis.recommendations),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}:", title);
        for item in items {
            let _ = writeln!(out, "    • {}", item);
        }
    }
    out
}

/// Output of `briefsmith check`
pub fn render_completeness(poor: &[BriefField]) -> String {
    if poor.is_empty() {
        return format!("{} Every core section has substance.", "✓".green());
    }
    let mut out = format!(
        "{} {} of {} core sections are missing or too thin:\n",
        "✗".red().bold(),
        poor.len(),
        BriefField::ALL.len()
    );
    for field in poor {
        let _ = writeln!(out, "  • {} ({})", field.label(), field.key());
    }
    out
}

pub fn render_status(state: SessionState, progress: Progress, report: &AnalysisReport) -> String {
    format!(
        "Round {}/{} · state {} · score {:.0}% ({})",
        progress.current,
        progress.total,
        state,
        report.aggregate_percentage,
        report.overall.label()
    )
}

pub fn format_intro() -> String {
    format!(
        "{} Let's build your brief. Answer each question in your own words; type {} for commands.",
        "▸".cyan().bold(),
        "/help".bold()
    )
}

pub fn render_question(question: &str, progress: Progress) -> String {
    format!(
        "\n{} {}\n",
        format!("[{}/{}]", progress.current + 1, progress.total).dark_grey(),
        question.bold()
    )
}

pub fn render_changes(changed_fields: &[String]) -> String {
    if changed_fields.is_empty() {
        return format!("  {}", "No changes to the brief.".dark_grey());
    }
    format!("  {} Updated: {}", "✓".green(), changed_fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{ActionLibrary, Analyzer};
    use crate::brief::Brief;

    fn report() -> std::sync::Arc<AnalysisReport> {
        Analyzer::standard().analyze(&Brief::new().with("title", "Spring Refresh 2025"))
    }

    #[test]
    fn test_report_lists_every_section() {
        let report = report();
        let rendered = render_report(&report);
        for field in BriefField::ALL {
            assert!(rendered.contains(field.label()), "missing {}", field.label());
        }
        assert!(rendered.contains("Do these next"));
    }

    #[test]
    fn test_plan_shows_phases_and_checklists() {
        let rendered = render_plan(&report().action_plan);
        assert!(rendered.contains("Fundamentals"));
        assert!(rendered.contains("Final Polish"));
        assert!(rendered.contains("[ ]"));
    }

    #[test]
    fn test_degraded_report_is_flagged() {
        let report = AnalysisReport::fallback(&ActionLibrary::standard());
        assert!(render_report(&report).contains("minimal report"));
    }

    #[test]
    fn test_completeness_output() {
        assert!(render_completeness(&[]).contains("Every core section"));
        let rendered = render_completeness(&[BriefField::TargetAudience]);
        assert!(rendered.contains("1 of 16"));
        assert!(rendered.contains("targetAudience"));
    }

    #[test]
    fn test_changes_output() {
        assert!(render_changes(&[]).contains("No changes"));
        assert!(render_changes(&["title".to_string(), "budget".to_string()]).contains("title, budget"));
    }
}
