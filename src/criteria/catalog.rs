// Criteria catalog: what "good" looks like for each brief section
//
// The catalog is immutable configuration. Build it once with
// `CriteriaCatalog::standard()` and hand it to the engine behind an `Arc`.

use serde_json::Value;
use std::fmt;

use super::checks::{
    any_item, contains_any, every_item, has_date, has_number, is_placeholder, item_count,
    item_mentions, mean_item_words, sentence_count, text_of, word_count,
};
use super::{Difficulty, ImpactLevel, QuickWin};
use crate::brief::BriefField;

/// One deterministic check over a section value.
#[derive(Clone)]
pub struct Check {
    pub id: &'static str,
    pub title: &'static str,
    /// Shown when the check fails
    pub rationale: &'static str,
    pub why_it_matters: &'static str,
    pub impact: ImpactLevel,
    pub quick_win: Option<QuickWin>,
    pub predicate: fn(&Value) -> bool,
}

impl Check {
    pub fn new(
        id: &'static str,
        title: &'static str,
        impact: ImpactLevel,
        predicate: fn(&Value) -> bool,
    ) -> Self {
        Self {
            id,
            title,
            rationale: "",
            why_it_matters: "",
            impact,
            quick_win: None,
            predicate,
        }
    }

    pub fn because(mut self, rationale: &'static str, why_it_matters: &'static str) -> Self {
        self.rationale = rationale;
        self.why_it_matters = why_it_matters;
        self
    }

    pub fn quick_win(mut self, action: &'static str, minutes: u32, difficulty: Difficulty) -> Self {
        self.quick_win = Some(QuickWin {
            action,
            minutes,
            difficulty,
        });
        self
    }

    pub fn passes(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("impact", &self.impact)
            .finish_non_exhaustive()
    }
}

/// Criteria for one trackable section
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub field: BriefField,
    pub category: &'static str,
    pub icon: &'static str,
    pub good_example: &'static str,
    pub learning_tip: &'static str,
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone)]
pub struct CriteriaCatalog {
    entries: Vec<CatalogEntry>,
}

impl CriteriaCatalog {
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, field: BriefField) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.field == field)
    }

    /// The built-in catalog covering all sixteen indispensable fields.
    pub fn standard() -> Self {
        use Difficulty::{Easy, Hard, Medium as Mid};
        use ImpactLevel::{High, Low, Medium};

        let entries = vec![
            CatalogEntry {
                field: BriefField::Title,
                category: "Identity",
                icon: "🏷️",
                good_example: "Spring Refresh 2025: Win Back Lapsed Home Cooks",
                learning_tip: "A good title lets a stakeholder guess the goal without reading further.",
                checks: vec![
                    Check::new("named", "Has a real title", High, |v| {
                        let t = text_of(v);
                        t.chars().count() >= 5 && !is_placeholder(&t)
                    })
                    .because(
                        "The title is missing or still a placeholder.",
                        "The title is how the brief is found, shared and remembered.",
                    )
                    .quick_win("Replace the placeholder with a working title naming product and goal", 5, Easy),
                    Check::new("descriptive", "Describes the initiative", Medium, |v| {
                        word_count(&text_of(v)) >= 3
                    })
                    .because(
                        "One or two words rarely say what the campaign is for.",
                        "Descriptive titles reduce kickoff confusion across teams.",
                    ),
                    Check::new("concise", "Fits on one line", Low, |v| {
                        (1..=12).contains(&word_count(&text_of(v)))
                    })
                    .because(
                        "Titles longer than twelve words read like summaries.",
                        "Short titles survive being pasted into calendars and decks.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Summary,
                category: "Overview",
                icon: "📝",
                good_example: "Relaunch the meal-kit app to win back lapsed subscribers aged 28-45 through a six-week spring campaign. We aim for 15% reactivation by June 30.",
                learning_tip: "Answer what, who, why and by when in three sentences or fewer.",
                checks: vec![
                    Check::new("substantive", "Says enough to brief someone", High, |v| {
                        text_of(v).chars().count() >= 80
                    })
                    .because(
                        "The summary is too short to stand on its own.",
                        "Busy stakeholders often read only the summary.",
                    )
                    .quick_win("Expand the summary to cover what, who and by when", 10, Easy),
                    Check::new("goal", "States the intended outcome", Medium, |v| {
                        contains_any(
                            &text_of(v),
                            &["aim", "goal", "increase", "grow", "drive", "boost", "reduce", "launch", "win", "achieve"],
                        )
                    })
                    .because(
                        "The summary does not say what success looks like.",
                        "An outcome in the first paragraph anchors every later decision.",
                    ),
                    Check::new("structured", "Reads as complete sentences", Low, |v| {
                        sentence_count(&text_of(v)) >= 2
                    })
                    .because(
                        "A single fragment is hard to scan; use two or three sentences.",
                        "Sentence structure forces the reasoning to be explicit.",
                    ),
                    Check::new("focused", "Stays brief", Low, |v| {
                        (1..=150).contains(&word_count(&text_of(v)))
                    })
                    .because(
                        "The summary runs past 150 words.",
                        "Long summaries bury the one thing readers need.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Positioning,
                category: "Strategy",
                icon: "🎯",
                good_example: "For busy parents who want healthy dinners without planning, FreshBox is the meal kit that adapts weekly to your family's tastes, unlike fixed-menu competitors.",
                learning_tip: "Use the frame: For [audience] who [need], [brand] is the [category] that [benefit], unlike [alternative].",
                checks: vec![
                    Check::new("substantive", "Positioning statement present", High, |v| {
                        text_of(v).chars().count() >= 60
                    })
                    .because(
                        "There is no full positioning statement yet.",
                        "Positioning decides which messages and channels make sense.",
                    )
                    .quick_win("Fill in the For/who/is/that/unlike template", 15, Mid),
                    Check::new("audience", "Names who it is for", Medium, |v| {
                        contains_any(&text_of(v), &["for ", "who ", "audience", "customers", "users"])
                    })
                    .because(
                        "The statement does not say who the offer is for.",
                        "Positioning without an audience cannot be tested.",
                    ),
                    Check::new("differentiator", "Explains what sets it apart", High, |v| {
                        contains_any(
                            &text_of(v),
                            &["unlike", "only", "first", "better", "than", "instead", "differen", "unique"],
                        )
                    })
                    .because(
                        "Nothing distinguishes the offer from alternatives.",
                        "Without a differentiator, creative defaults to category clichés.",
                    )
                    .quick_win("Add an 'unlike …' clause naming the main alternative", 10, Mid),
                    Check::new("benefit", "States the benefit", Medium, |v| {
                        contains_any(
                            &text_of(v),
                            &["so that", "helps", "lets", "enables", "without", "save", "benefit"],
                        )
                    })
                    .because(
                        "The statement lists features but no benefit.",
                        "People act on benefits, not features.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Objectives,
                category: "Goals",
                icon: "🏁",
                good_example: r#"["Reactivate 15% of lapsed subscribers by June 30", "Lift weekly order frequency from 1.2 to 1.5 by Q3"]"#,
                learning_tip: "Make each objective specific, measurable and time-bound.",
                checks: vec![
                    Check::new("multiple", "At least two objectives", High, |v| item_count(v) >= 2)
                        .because(
                            "A single objective leaves trade-offs undefined.",
                            "Two or three objectives show what to prioritise.",
                        )
                        .quick_win("Add a secondary objective", 10, Easy),
                    Check::new("focused", "No more than six objectives", Low, |v| {
                        (1..=6).contains(&item_count(v))
                    })
                    .because(
                        "More than six objectives dilutes focus.",
                        "Teams can only optimise for a handful of goals at once.",
                    ),
                    Check::new("measurable", "Objectives carry numbers", High, |v| {
                        any_item(v, |i| has_number(&text_of(i)))
                    })
                    .because(
                        "None of the objectives is quantified.",
                        "Unmeasurable objectives cannot be reported on.",
                    )
                    .quick_win("Attach a target number to the main objective", 10, Mid),
                    Check::new("specific", "Objectives are specific", Medium, |v| {
                        mean_item_words(v) >= 4.0
                    })
                    .because(
                        "Objectives are too terse to act on.",
                        "Specific objectives translate directly into tasks.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::ProblemStatement,
                category: "Insight",
                icon: "🔍",
                good_example: "Lapsed subscribers say weekly planning feels like a chore: 62% of churn-survey respondents cited 'too much effort', and win-back emails convert below 2%.",
                learning_tip: "Describe the problem from the audience's side and back it with one piece of evidence.",
                checks: vec![
                    Check::new("substantive", "Problem is described", High, |v| {
                        text_of(v).chars().count() >= 60
                    })
                    .because(
                        "The problem statement is missing or too short.",
                        "Every creative decision should trace back to the problem.",
                    )
                    .quick_win("Write two sentences on what is broken and for whom", 15, Mid),
                    Check::new("affected", "Says who is affected", Medium, |v| {
                        contains_any(
                            &text_of(v),
                            &["customer", "user", "audience", "subscriber", "people", "buyer", "client", "parent", "team", "member", "visitor", "shopper"],
                        )
                    })
                    .because(
                        "It is unclear who experiences the problem.",
                        "Problems without people attached lead to generic solutions.",
                    ),
                    Check::new("evidence", "Backed by evidence", High, |v| {
                        let t = text_of(v);
                        has_number(&t)
                            || contains_any(
                                &t,
                                &["research", "survey", "data", "study", "report", "interview", "feedback", "analytics"],
                            )
                    })
                    .because(
                        "No data or research supports the problem.",
                        "Evidence turns an opinion into a mandate.",
                    )
                    .quick_win("Cite one statistic or research finding", 20, Mid),
                ],
            },
            CatalogEntry {
                field: BriefField::TargetAudience,
                category: "Audience",
                icon: "👥",
                good_example: r#"[{"segment": "Lapsed subscribers", "description": "Parents aged 28-45 who cancelled in the last 12 months", "needs": "Less planning effort, predictable weekly cost"}]"#,
                learning_tip: "Describe audiences by situation and motivation, not only demographics.",
                checks: vec![
                    Check::new("defined", "Audience is defined", High, |v| {
                        word_count(&text_of(v)) >= 5
                    })
                    .because(
                        "The audience is missing or only a label.",
                        "Everything in the brief is written for someone; name them.",
                    )
                    .quick_win("Describe the primary audience in one sentence", 15, Easy),
                    Check::new("needs", "Captures needs or pain points", High, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["need", "pain", "want", "motivat", "frustrat", "goal", "struggl", "challenge"],
                            )
                        })
                    })
                    .because(
                        "The audience has no stated needs or pain points.",
                        "Needs are what the messaging has to answer.",
                    )
                    .quick_win("Add the top need or frustration for each segment", 15, Mid),
                    Check::new("concrete", "Includes concrete detail", Medium, |v| {
                        let t = text_of(v);
                        has_number(&t)
                            || contains_any(
                                &t,
                                &["aged", "age ", "located", "based in", "income", "role", "job", "city", "urban", "rural", "gen z", "millennial"],
                            )
                    })
                    .because(
                        "The description lacks concrete detail such as age, role or location.",
                        "Concrete detail lets media teams actually target the audience.",
                    ),
                    Check::new("prioritised", "Segments are prioritised", Low, |v| {
                        item_count(v) >= 2 || contains_any(&text_of(v), &["primary", "secondary"])
                    })
                    .because(
                        "Only one undifferentiated audience is described.",
                        "Prioritised segments make budget allocation defensible.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::SuccessMetrics,
                category: "Measurement",
                icon: "📊",
                good_example: r#"[{"metric": "Reactivation rate", "target": "15% by June 30", "source": "CRM cohort report"}, {"metric": "Orders per active user", "target": "1.5 per week by Q3", "source": "Analytics dashboard"}]"#,
                learning_tip: "Every metric needs a target, a deadline and a data source.",
                checks: vec![
                    Check::new("multiple", "At least two metrics", High, |v| item_count(v) >= 2)
                        .because(
                            "One metric cannot capture both reach and outcome.",
                            "A pair of metrics guards against gaming a single number.",
                        )
                        .quick_win("Add a leading indicator alongside the main KPI", 10, Easy),
                    Check::new("quantified", "Every metric has a target", High, |v| {
                        every_item(v, |i| has_number(&text_of(i)))
                    })
                    .because(
                        "Some metrics have no numeric target.",
                        "Without targets there is no way to call the campaign a success.",
                    )
                    .quick_win("Give each metric a numeric target", 15, Mid),
                    Check::new("timebound", "Targets have a deadline", Medium, |v| {
                        has_date(&text_of(v))
                    })
                    .because(
                        "Targets are not tied to a date or period.",
                        "Deadlines decide when results are read.",
                    ),
                    Check::new("sourced", "Data source named", Low, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["measure", "track", "source", "report", "dashboard", "analytics", "survey", "crm"],
                            )
                        })
                    })
                    .because(
                        "No data source is named for the metrics.",
                        "Agreeing on the source up front avoids arguments at review time.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Requirements,
                category: "Scope",
                icon: "📋",
                good_example: r#"["Landing page with personalised menu preview", "Reactivation offer code valid for 14 days", "Imagery approved by brand and legal"]"#,
                learning_tip: "Write requirements as statements a reviewer could tick off.",
                checks: vec![
                    Check::new("coverage", "At least three requirements", High, |v| item_count(v) >= 3)
                        .because(
                            "Too few requirements to scope the work.",
                            "Missing requirements surface late as rework.",
                        )
                        .quick_win("List the deliverables the team must produce", 15, Easy),
                    Check::new("specific", "Requirements are specific", Medium, |v| {
                        mean_item_words(v) >= 4.0
                    })
                    .because(
                        "Requirements are single words rather than statements.",
                        "Specific requirements are verifiable.",
                    ),
                    Check::new("constraints", "Constraints are captured", Medium, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["must", "should", "budget", "deadline", "approv", "comply", "brand", "legal", "format", "size"],
                            )
                        })
                    })
                    .because(
                        "No constraints (budget, brand, legal, format) are stated.",
                        "Constraints shape creative as much as goals do.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::KeyMessages,
                category: "Messaging",
                icon: "💬",
                good_example: r#"["Dinner, decided: we plan, you cook", "Your first box back is 40% off", "Skip any week, no questions asked"]"#,
                learning_tip: "Rank messages; the audience will remember one, so lead with it.",
                checks: vec![
                    Check::new("count", "Two to five messages", High, |v| {
                        (2..=5).contains(&item_count(v))
                    })
                    .because(
                        "Use between two and five key messages.",
                        "Too few limits testing; too many means none land.",
                    )
                    .quick_win("Trim or add messages until there are three", 10, Easy),
                    Check::new("concise", "Each message is short", Medium, |v| {
                        every_item(v, |i| word_count(&text_of(i)) <= 20)
                    })
                    .because(
                        "Some messages run longer than twenty words.",
                        "Messages must survive a headline or a five-second ad.",
                    ),
                    Check::new("audience_facing", "Speaks to the audience", Low, |v| {
                        any_item(v, |i| {
                            let t = format!(" {} ", text_of(i).to_lowercase());
                            t.contains(" you ") || t.contains(" your ") || t.contains("you'")
                        })
                    })
                    .because(
                        "Messages talk about the brand rather than to the audience.",
                        "Second-person copy tests better in almost every category.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Timeline,
                category: "Schedule",
                icon: "🗓️",
                good_example: r#"[{"milestone": "Creative approved", "date": "2025-03-14"}, {"milestone": "Launch", "date": "2025-04-01"}, {"milestone": "Results review", "date": "2025-06-30"}]"#,
                learning_tip: "Anchor at least kickoff, launch and review to real dates.",
                checks: vec![
                    Check::new("milestones", "At least three milestones", High, |v| item_count(v) >= 3)
                        .because(
                            "The timeline has fewer than three milestones.",
                            "Milestones are where slippage becomes visible.",
                        )
                        .quick_win("Add kickoff, launch and review milestones", 10, Easy),
                    Check::new("dated", "Every milestone is dated", High, |v| {
                        every_item(v, |i| has_date(&text_of(i)))
                    })
                    .because(
                        "Some milestones have no date.",
                        "Undated milestones cannot be tracked.",
                    )
                    .quick_win("Put a date or week number on each milestone", 10, Easy),
                    Check::new("launch", "Includes the launch", Medium, |v| {
                        contains_any(&text_of(v), &["launch", "go live", "go-live", "release", "live"])
                    })
                    .because(
                        "No launch or go-live moment appears in the timeline.",
                        "Everything else schedules backwards from launch.",
                    ),
                    Check::new("review", "Includes a results review", Low, |v| {
                        contains_any(&text_of(v), &["review", "retro", "report", "evaluat", "debrief", "wrap"])
                    })
                    .because(
                        "There is no review or reporting milestone.",
                        "A scheduled review is what closes the learning loop.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::ChannelsTactics,
                category: "Channels",
                icon: "📣",
                good_example: r#"[{"channel": "Email", "tactic": "Three-step win-back sequence with personalised menus", "budget": "10%"}, {"channel": "Paid social", "tactic": "Retarget lapsed users with recipe reels", "budget": "60%"}]"#,
                learning_tip: "Pair each channel with a specific tactic and the audience it reaches.",
                checks: vec![
                    Check::new("multiple", "At least two channels", High, |v| item_count(v) >= 2)
                        .because(
                            "Only one channel is planned.",
                            "A single channel is a single point of failure.",
                        )
                        .quick_win("Add a supporting channel", 10, Easy),
                    Check::new("tactics", "Each channel has a tactic", Medium, |v| {
                        every_item(v, |i| word_count(&text_of(i)) >= 4)
                    })
                    .because(
                        "Channels are listed without how they will be used.",
                        "'Social' is a place; the tactic is the plan.",
                    ),
                    Check::new("weighted", "Effort or budget is weighted", Low, |v| {
                        let t = text_of(v);
                        has_number(&t) || contains_any(&t, &["budget", "spend", "share", "priority", "primary"])
                    })
                    .because(
                        "Nothing says how effort or budget is split across channels.",
                        "Weighting makes the plan executable by media teams.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::RiskAnalysis,
                category: "Risk",
                icon: "⚠️",
                good_example: r#"[{"risk": "Creative approval slips", "impact": "high", "mitigation": "Book legal review slots two weeks early"}, {"risk": "Offer cannibalises full-price orders", "impact": "medium", "mitigation": "Limit the code to accounts inactive for 90+ days"}]"#,
                learning_tip: "For each risk, state its impact and one concrete mitigation.",
                checks: vec![
                    Check::new("identified", "At least two risks", High, |v| item_count(v) >= 2)
                        .because(
                            "Fewer than two risks are identified.",
                            "Every campaign has at least schedule and performance risk.",
                        )
                        .quick_win("List the two things most likely to go wrong", 15, Mid),
                    Check::new("mitigated", "Every risk has a mitigation", High, |v| {
                        every_item(v, |i| {
                            item_mentions(
                                i,
                                &["mitigat", "fallback", "contingen", "plan b", "backup", "prevent", "reduce"],
                            )
                        })
                    })
                    .because(
                        "Some risks have no mitigation.",
                        "A risk without a response is only a worry.",
                    )
                    .quick_win("Add one mitigation per risk", 20, Mid),
                    Check::new("assessed", "Impact or likelihood assessed", Medium, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["impact", "likelihood", "probability", "severity", "high", "medium", "low"],
                            )
                        })
                    })
                    .because(
                        "Risks are not rated for impact or likelihood.",
                        "Ratings decide which mitigations get funded.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Dependencies,
                category: "Dependencies",
                icon: "🔗",
                good_example: r#"["Product team ships the menu-preview API by March 1", "Legal approves offer terms by March 7 (owner: J. Rivera)"]"#,
                learning_tip: "A dependency without an owner and a date is only a hope.",
                checks: vec![
                    Check::new("listed", "Dependencies listed", High, |v| item_count(v) >= 2)
                        .because(
                            "Fewer than two dependencies are listed.",
                            "Hidden dependencies are the most common cause of slippage.",
                        )
                        .quick_win("List the teams or vendors you are waiting on", 10, Easy),
                    Check::new("owned", "Dependencies have owners", Medium, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["owner", "team", "by ", "lead", "responsible", "vendor", "agency", "dept"],
                            )
                        })
                    })
                    .because(
                        "No owner is named for any dependency.",
                        "Owners are who you chase when things slip.",
                    ),
                    Check::new("dated", "Dependencies have due dates", Medium, |v| {
                        any_item(v, |i| has_date(&text_of(i)))
                    })
                    .because(
                        "Dependencies carry no due dates.",
                        "Dates let you see conflicts with the timeline.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::Assumptions,
                category: "Assumptions",
                icon: "🧩",
                good_example: r#"["Lapsed users still have the app installed (validate via push-token audit)", "Offer margin stays positive at a 40% discount (confirm with finance)"]"#,
                learning_tip: "Note how each assumption will be validated before launch.",
                checks: vec![
                    Check::new("listed", "At least two assumptions", High, |v| item_count(v) >= 2)
                        .because(
                            "Fewer than two assumptions are written down.",
                            "Unstated assumptions become surprises.",
                        )
                        .quick_win("Write down what must be true for the plan to work", 10, Easy),
                    Check::new("specific", "Assumptions are specific", Medium, |v| {
                        mean_item_words(v) >= 5.0
                    })
                    .because(
                        "Assumptions are too vague to test.",
                        "Specific assumptions can be checked cheaply.",
                    ),
                    Check::new("validated", "Validation approach noted", Medium, |v| {
                        any_item(v, |i| {
                            item_mentions(i, &["validat", "test", "verify", "confirm", "check", "measure"])
                        })
                    })
                    .because(
                        "No assumption says how it will be validated.",
                        "Validation plans turn assumptions into tasks.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::OutOfScope,
                category: "Boundaries",
                icon: "🚫",
                good_example: r#"["New-customer acquisition (covered by the Q3 brand brief)", "Changes to pricing tiers", "Retail partnerships"]"#,
                learning_tip: "Listing what you won't do prevents scope creep later.",
                checks: vec![
                    Check::new("listed", "At least two exclusions", High, |v| item_count(v) >= 2)
                        .because(
                            "Fewer than two exclusions are listed.",
                            "Explicit exclusions stop scope creep before it starts.",
                        )
                        .quick_win("Name two things stakeholders might expect but won't get", 10, Easy),
                    Check::new("specific", "Exclusions are specific", Medium, |v| {
                        mean_item_words(v) >= 2.0
                    })
                    .because(
                        "Exclusions are single words that could mean anything.",
                        "Specific exclusions are enforceable.",
                    ),
                    Check::new("explained", "Exclusions are explained", Low, |v| {
                        any_item(v, |i| {
                            item_mentions(
                                i,
                                &["later", "phase 2", "next", "future", "separate", "because", "owned by", "handled", "covered"],
                            )
                        })
                    })
                    .because(
                        "No exclusion says where that work lives instead.",
                        "Pointing elsewhere keeps excluded work from being lost.",
                    ),
                ],
            },
            CatalogEntry {
                field: BriefField::PhasedPlan,
                category: "Execution",
                icon: "🪜",
                good_example: r#"[{"phase": "Prepare", "timing": "Weeks 1-2", "deliverables": "Creative, offer codes, segments"}, {"phase": "Launch", "timing": "Weeks 3-6", "deliverables": "Email and social flights"}, {"phase": "Learn", "timing": "Week 7", "deliverables": "Results readout"}]"#,
                learning_tip: "Give each phase a goal, timing and a clear deliverable.",
                checks: vec![
                    Check::new("phased", "At least two phases", High, |v| item_count(v) >= 2)
                        .because(
                            "The plan is not broken into phases.",
                            "Phases create natural checkpoints.",
                        )
                        .quick_win("Split the work into prepare, launch and learn", 15, Mid),
                    Check::new("timed", "Every phase has timing", Medium, |v| {
                        every_item(v, |i| has_date(&text_of(i)))
                    })
                    .because(
                        "Some phases have no timing.",
                        "Timing keeps phases aligned with the timeline.",
                    ),
                    Check::new("deliverables", "Phases name deliverables", Medium, |v| {
                        every_item(v, |i| word_count(&text_of(i)) >= 4)
                    })
                    .because(
                        "Phases do not say what they produce.",
                        "Deliverables are how progress is recognised.",
                    )
                    .quick_win("Add one deliverable per phase", 15, Hard),
                ],
            },
        ];

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_catalog_covers_every_indispensable_field() {
        let catalog = CriteriaCatalog::standard();
        for field in BriefField::ALL {
            let entry = catalog.entry(field).expect("entry for every field");
            assert!(!entry.checks.is_empty(), "{field} has no checks");
        }
        assert_eq!(catalog.entries().len(), 16);
    }

    #[test]
    fn test_check_ids_unique_within_entry() {
        let catalog = CriteriaCatalog::standard();
        for entry in catalog.entries() {
            let mut ids: Vec<&str> = entry.checks.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            assert_eq!(before, ids.len(), "duplicate check id in {}", entry.field);
        }
    }

    #[test]
    fn test_every_check_has_rationale() {
        let catalog = CriteriaCatalog::standard();
        for entry in catalog.entries() {
            for check in &entry.checks {
                assert!(!check.rationale.is_empty(), "{}:{}", entry.field, check.id);
                assert!(!check.why_it_matters.is_empty(), "{}:{}", entry.field, check.id);
            }
        }
    }

    #[test]
    fn test_checks_fail_on_empty_values() {
        let catalog = CriteriaCatalog::standard();
        for entry in catalog.entries() {
            for value in [Value::Null, json!(""), json!([]), json!({})] {
                for check in &entry.checks {
                    assert!(
                        !check.passes(&value),
                        "{}:{} passed on {value}",
                        entry.field,
                        check.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_good_examples_score_well() {
        let catalog = CriteriaCatalog::standard();
        for entry in catalog.entries() {
            let example: Value = serde_json::from_str(entry.good_example)
                .unwrap_or_else(|_| Value::String(entry.good_example.to_string()));
            let passed = entry.checks.iter().filter(|c| c.passes(&example)).count();
            assert!(
                passed * 10 >= entry.checks.len() * 6,
                "{} good example only passes {passed}/{}",
                entry.field,
                entry.checks.len()
            );
        }
    }

    #[test]
    fn test_debug_omits_predicate() {
        let check = Check::new("x", "X", ImpactLevel::Low, |_| true);
        let debug = format!("{check:?}");
        assert!(debug.contains("\"x\""));
        assert!(!debug.contains("predicate"));
    }
}
