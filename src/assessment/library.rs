// Action library: the fixed remediation vocabulary used by plans and
// priority actions. Built once and shared behind an `Arc`.

use serde::Serialize;

use crate::brief::BriefField;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub minutes: u32,
}

impl LibraryAction {
    fn new(id: impl Into<String>, title: &str, description: &str, minutes: u32) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            description: description.to_string(),
            minutes,
        }
    }
}

/// Actions tied to one brief section
#[derive(Debug, Clone)]
pub struct SectionActions {
    pub field: BriefField,
    /// Task title when the section appears in an action plan
    pub task_title: String,
    pub general: LibraryAction,
    /// Used when the section is incomplete or needs work
    pub critical: LibraryAction,
    /// Used when the section is improvable, fair or good
    pub improvement: LibraryAction,
}

/// A fixed task in the Final Polish phase
#[derive(Debug, Clone)]
pub struct PolishTask {
    pub id: String,
    pub title: String,
    pub checklist: Vec<String>,
    pub success_criteria: String,
}

#[derive(Debug, Clone)]
pub struct ActionLibrary {
    sections: Vec<SectionActions>,
    /// Offered when the brief as a whole is weak
    pub fundamentals: Vec<LibraryAction>,
    /// Offered when the brief is already strong
    pub advanced: Vec<LibraryAction>,
    pub polish: Vec<PolishTask>,
}

impl ActionLibrary {
    pub fn section(&self, field: BriefField) -> Option<&SectionActions> {
        self.sections.iter().find(|s| s.field == field)
    }

    pub fn sections(&self) -> &[SectionActions] {
        &self.sections
    }

    pub fn standard() -> Self {
        let rows: [(BriefField, &str, [(&str, &str, u32); 3]); 16] = [
            (BriefField::Title, "Sharpen the brief title", [
                ("Review the title", "Check the title names the product and the goal.", 5),
                ("Write a working title", "Replace the placeholder with a descriptive working title.", 5),
                ("Tighten the title", "Cut the title to one line that still names the goal.", 5),
            ]),
            (BriefField::Summary, "Write an executive summary", [
                ("Re-read the summary", "Confirm the summary answers what, who, why and by when.", 10),
                ("Draft the summary", "Write two or three sentences covering what, who and by when.", 15),
                ("Sharpen the summary", "Lead with the outcome and cut anything a reader can skip.", 10),
            ]),
            (BriefField::Positioning, "Clarify positioning", [
                ("Pressure-test positioning", "Ask whether a competitor could claim the same statement.", 15),
                ("Write a positioning statement", "Fill in For/who/is/that/unlike for the primary audience.", 20),
                ("Add a differentiator", "Name the main alternative and what makes this offer better.", 15),
            ]),
            (BriefField::Objectives, "Define measurable objectives", [
                ("Audit objectives", "Make sure each objective could be reported on.", 10),
                ("Set objectives", "Write two or three objectives with a number and a date.", 20),
                ("Quantify objectives", "Attach targets and deadlines to the existing objectives.", 15),
            ]),
            (BriefField::ProblemStatement, "State the problem clearly", [
                ("Revisit the problem", "Check the problem is stated from the audience's side.", 10),
                ("Write the problem statement", "Describe what is broken, for whom, and how you know.", 20),
                ("Back the problem with evidence", "Add one statistic or research finding.", 15),
            ]),
            (BriefField::TargetAudience, "Define your target audience", [
                ("Review audience definition", "Confirm segments, needs and concrete detail are present.", 10),
                ("Define the audience", "Describe the primary audience, their situation and their main need.", 25),
                ("Deepen audience insight", "Add needs, motivations and a secondary segment.", 15),
            ]),
            (BriefField::SuccessMetrics, "Set quantified success metrics", [
                ("Check metric coverage", "Make sure metrics cover both reach and outcome.", 10),
                ("Choose success metrics", "Pick two metrics with targets, deadlines and sources.", 20),
                ("Quantify metrics", "Give every metric a numeric target and a data source.", 15),
            ]),
            (BriefField::Requirements, "List concrete requirements", [
                ("Review requirements", "Check each requirement is verifiable.", 10),
                ("List requirements", "Write down every deliverable and hard constraint.", 20),
                ("Add constraints", "Capture budget, brand, legal and format constraints.", 10),
            ]),
            (BriefField::KeyMessages, "Craft key messages", [
                ("Rank key messages", "Order messages so the most important one leads.", 10),
                ("Write key messages", "Draft three short messages written to the audience.", 20),
                ("Tighten key messages", "Cut each message to twenty words or fewer.", 10),
            ]),
            (BriefField::Timeline, "Build a dated timeline", [
                ("Check the timeline", "Confirm milestones are dated and include launch and review.", 5),
                ("Build the timeline", "Add kickoff, launch and review milestones with dates.", 15),
                ("Date every milestone", "Put a date or week number on each milestone.", 10),
            ]),
            (BriefField::ChannelsTactics, "Choose channels and tactics", [
                ("Review channel mix", "Check each channel has a tactic and a weighting.", 10),
                ("Choose channels", "Pick at least two channels and say how each will be used.", 20),
                ("Weight the channels", "Split budget or effort across channels.", 10),
            ]),
            (BriefField::RiskAnalysis, "Analyse risks and mitigations", [
                ("Review risks", "Re-rate risks now that the plan is clearer.", 10),
                ("Identify risks", "List the two biggest risks with impact and mitigation.", 20),
                ("Add mitigations", "Give every risk an owner-ready mitigation.", 15),
            ]),
            (BriefField::Dependencies, "Map dependencies and owners", [
                ("Confirm dependencies", "Check every dependency with its owner.", 10),
                ("Map dependencies", "List the teams, vendors and approvals you are waiting on.", 15),
                ("Assign owners and dates", "Give each dependency an owner and a due date.", 10),
            ]),
            (BriefField::Assumptions, "Document assumptions", [
                ("Revisit assumptions", "Drop assumptions that have since been validated.", 5),
                ("Write down assumptions", "List what must be true for the plan to work.", 15),
                ("Plan validation", "Say how each assumption will be checked before launch.", 10),
            ]),
            (BriefField::OutOfScope, "Set out-of-scope boundaries", [
                ("Review exclusions", "Check stakeholders have seen the exclusions list.", 5),
                ("Define exclusions", "Name the things stakeholders might expect but won't get.", 10),
                ("Explain exclusions", "Say where excluded work is handled instead.", 10),
            ]),
            (BriefField::PhasedPlan, "Lay out a phased plan", [
                ("Review the phased plan", "Check phases line up with the timeline.", 10),
                ("Plan the phases", "Split the work into phases with timing and deliverables.", 25),
                ("Detail each phase", "Add timing and a deliverable to every phase.", 15),
            ]),
        ];

        let sections = rows
            .into_iter()
            .map(|(field, task_title, [general, critical, improvement])| {
                let key = field.key();
                SectionActions {
                    field,
                    task_title: task_title.to_string(),
                    general: LibraryAction::new(format!("{key}-general"), general.0, general.1, general.2),
                    critical: LibraryAction::new(format!("{key}-critical"), critical.0, critical.1, critical.2),
                    improvement: LibraryAction::new(
                        format!("{key}-improve"),
                        improvement.0,
                        improvement.1,
                        improvement.2,
                    ),
                }
            })
            .collect();

        let fundamentals = vec![
            LibraryAction::new(
                "fundamental-core-story",
                "Nail the core story first",
                "Write the problem, audience and objectives before anything else; every other section depends on them.",
                45,
            ),
            LibraryAction::new(
                "fundamental-stakeholder-input",
                "Gather stakeholder input",
                "Spend fifteen minutes with the sponsor to confirm goals and constraints.",
                30,
            ),
        ];

        let advanced = vec![
            LibraryAction::new(
                "advanced-message-test",
                "Test key messages",
                "Put the top two messages in front of five people from the target audience.",
                60,
            ),
            LibraryAction::new(
                "advanced-scenario-plan",
                "Plan for an underperforming launch",
                "Decide in advance which lever you pull if metrics trail at the first review.",
                30,
            ),
        ];

        let polish = vec![
            PolishTask {
                id: "polish-consistency".to_string(),
                title: "Check cross-section consistency".to_string(),
                checklist: vec![
                    "Objectives and success metrics describe the same outcomes".to_string(),
                    "Timeline and phased plan use the same dates".to_string(),
                    "Key messages reflect the positioning".to_string(),
                ],
                success_criteria: "No section contradicts another".to_string(),
            },
            PolishTask {
                id: "polish-presentation".to_string(),
                title: "Polish presentation".to_string(),
                checklist: vec![
                    "Remove placeholders and duplicated wording".to_string(),
                    "Use one voice and tense throughout".to_string(),
                    "Read the brief start to finish as a newcomer".to_string(),
                ],
                success_criteria: "A newcomer can brief the team from the document alone".to_string(),
            },
        ];

        Self {
            sections,
            fundamentals,
            advanced,
            polish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_covers_every_field() {
        let library = ActionLibrary::standard();
        for field in BriefField::ALL {
            let section = library.section(field).expect("section actions");
            assert!(section.general.id.starts_with(field.key()));
            assert_ne!(section.critical.id, section.improvement.id);
        }
        assert_eq!(library.sections().len(), 16);
    }

    #[test]
    fn test_audience_task_mentions_audience() {
        let library = ActionLibrary::standard();
        let section = library.section(BriefField::TargetAudience).unwrap();
        assert!(section.task_title.to_lowercase().contains("audience"));
    }

    #[test]
    fn test_polish_tasks_never_empty() {
        let library = ActionLibrary::standard();
        assert!(!library.polish.is_empty());
        assert!(library.polish.iter().all(|t| !t.checklist.is_empty()));
    }
}
