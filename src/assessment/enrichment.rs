// Analysis enrichment: narrative analysis from the model, with a local fallback

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::AnalysisReport;
use crate::brief::Brief;
use crate::claude::Message;
use crate::errors::{BriefError, BriefResult};
use crate::generators::{extract_json_object, strip_markdown_fences, Generator};

/// Keys a model response must carry to be accepted
pub const REQUIRED_KEYS: [&str; 7] = [
    "overallScore",
    "dimensionScores",
    "strengths",
    "weaknesses",
    "criticalIssues",
    "recommendations",
    "sectionAnalysis",
];

const ENRICHMENT_SYSTEM_PROMPT: &str = "\
You review creative and marketing briefs. Reply with a single JSON object and nothing else, \
with exactly these keys: overallScore (number 0-100), dimensionScores (object of name -> number), \
strengths (array of strings), weaknesses (array of strings), criticalIssues (array of strings), \
recommendations (array of strings), sectionAnalysis (object of section key -> string).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Model,
    #[default]
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAnalysis {
    pub overall_score: f64,
    pub dimension_scores: BTreeMap<String, f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub section_analysis: BTreeMap<String, String>,
    #[serde(skip_deserializing)]
    pub source: AnalysisSource,
}

pub struct AnalysisEnricher {
    generator: Arc<dyn Generator>,
}

impl AnalysisEnricher {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Model analysis when it works, local heuristic otherwise. Never fails.
    pub async fn enrich(&self, brief: &Brief, report: &AnalysisReport) -> EnrichedAnalysis {
        match self.request(brief).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Enrichment via {} failed, using local analysis: {}", self.generator.name(), e);
                local_enriched_analysis(report)
            }
        }
    }

    async fn request(&self, brief: &Brief) -> BriefResult<EnrichedAnalysis> {
        let prompt = format!("Analyse this brief:\n\n{}", brief.to_pretty_json());
        let response = self
            .generator
            .generate(vec![Message::user(prompt)], Some(ENRICHMENT_SYSTEM_PROMPT.to_string()))
            .await
            .map_err(|e| BriefError::Network(format!("{e:#}")))?;
        parse_enrichment(&response.text)
    }
}

/// Parse and validate a model enrichment response.
pub fn parse_enrichment(text: &str) -> BriefResult<EnrichedAnalysis> {
    let stripped = strip_markdown_fences(text);
    let value: Value = serde_json::from_str(stripped)
        .or_else(|e| {
            extract_json_object(stripped)
                .and_then(|slice| serde_json::from_str(slice).ok())
                .ok_or(e)
        })
        .map_err(|e| BriefError::Parse(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| BriefError::Validation("expected a JSON object".to_string()))?;
    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|k| !object.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        return Err(BriefError::Validation(format!("missing keys: {}", missing.join(", "))));
    }

    let mut analysis: EnrichedAnalysis =
        serde_json::from_value(value).map_err(|e| BriefError::Validation(e.to_string()))?;
    analysis.overall_score = analysis.overall_score.clamp(0.0, 100.0);
    analysis.source = AnalysisSource::Model;
    Ok(analysis)
}

/// Deterministic narrative built from the local report alone.
pub fn local_enriched_analysis(report: &AnalysisReport) -> EnrichedAnalysis {
    let mut dimension_totals: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for check in &report.health_checks {
        let entry = dimension_totals.entry(check.category.clone()).or_default();
        entry.0 += check.earned;
        entry.1 += check.max;
    }
    let dimension_scores = dimension_totals
        .into_iter()
        .map(|(name, (earned, max))| (name, crate::criteria::percentage(earned, max)))
        .collect();

    let strengths = report
        .health_checks
        .iter()
        .filter(|c| c.score.is_top_tier())
        .map(|c| format!("{} is {}", c.field.label(), c.score.label()))
        .collect();
    let weaknesses = report
        .health_checks
        .iter()
        .filter(|c| c.score.is_improvable())
        .map(|c| c.headline.clone())
        .collect();
    let critical_issues = report
        .health_checks
        .iter()
        .filter(|c| c.score.is_critical())
        .map(|c| c.headline.clone())
        .collect();
    let recommendations = report
        .priority_actions
        .iter()
        .map(|a| format!("{}: {}", a.title, a.description))
        .collect();
    let section_analysis = report
        .health_checks
        .iter()
        .map(|c| (c.field.key().to_string(), c.headline.clone()))
        .collect();

    EnrichedAnalysis {
        overall_score: report.aggregate_percentage,
        dimension_scores,
        strengths,
        weaknesses,
        critical_issues,
        recommendations,
        section_analysis,
        source: AnalysisSource::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{ActionLibrary, AnalysisReport};
    use crate::criteria::{CriteriaCatalog, RuleEngine};
    use crate::generators::GeneratorResponse;
    use anyhow::Result;
    use async_trait::async_trait;

    const VALID: &str = r#"{
        "overallScore": 72,
        "dimensionScores": {"clarity": 80, "measurability": 60},
        "strengths": ["Clear audience"],
        "weaknesses": ["Vague metrics"],
        "criticalIssues": [],
        "recommendations": ["Quantify the objectives"],
        "sectionAnalysis": {"objectives": "Needs numbers"}
    }"#;

    struct CannedGenerator(std::result::Result<String, String>);

    #[async_trait]
    impl Generator for CannedGenerator {
        async fn generate(&self, _messages: Vec<Message>, _system: Option<String>) -> Result<GeneratorResponse> {
            match &self.0 {
                Ok(text) => Ok(GeneratorResponse::text("canned", text.clone())),
                Err(e) => anyhow::bail!("{}", e),
            }
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn report() -> AnalysisReport {
        let engine = RuleEngine::new(Arc::new(CriteriaCatalog::standard()));
        let brief = Brief::new().with("title", "Spring Refresh 2025: win back lapsed subscribers");
        AnalysisReport::build(&brief, &engine, &ActionLibrary::standard(), 8)
    }

    #[test]
    fn test_parse_valid_response() {
        let analysis = parse_enrichment(VALID).unwrap();
        assert_eq!(analysis.overall_score, 72.0);
        assert_eq!(analysis.source, AnalysisSource::Model);
        assert_eq!(analysis.dimension_scores["clarity"], 80.0);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{VALID}\n```");
        assert!(parse_enrichment(&fenced).is_ok());
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        let err = parse_enrichment(r#"{"overallScore": 50, "strengths": []}"#).unwrap_err();
        match err {
            BriefError::Validation(msg) => {
                assert!(msg.contains("dimensionScores"));
                assert!(msg.contains("sectionAnalysis"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_json_and_wrong_types() {
        assert!(matches!(parse_enrichment("no idea"), Err(BriefError::Parse(_))));
        assert!(matches!(parse_enrichment("[1, 2]"), Err(BriefError::Validation(_))));
        let wrong = VALID.replace("\"overallScore\": 72", "\"overallScore\": \"high\"");
        assert!(matches!(parse_enrichment(&wrong), Err(BriefError::Validation(_))));
    }

    #[test]
    fn test_local_analysis_mirrors_report() {
        let report = report();
        let analysis = local_enriched_analysis(&report);
        assert_eq!(analysis.source, AnalysisSource::Local);
        assert_eq!(analysis.overall_score, report.aggregate_percentage);
        assert_eq!(analysis.section_analysis.len(), 16);
        assert!(!analysis.critical_issues.is_empty());
        assert_eq!(analysis.recommendations.len(), report.priority_actions.len());
    }

    #[tokio::test]
    async fn test_enrich_uses_model_when_valid() {
        let enricher = AnalysisEnricher::new(Arc::new(CannedGenerator(Ok(VALID.to_string()))));
        let analysis = enricher.enrich(&Brief::new(), &report()).await;
        assert_eq!(analysis.source, AnalysisSource::Model);
    }

    #[tokio::test]
    async fn test_enrich_falls_back_on_failure() {
        let report = report();
        for generator in [
            CannedGenerator(Err("connection refused".to_string())),
            CannedGenerator(Ok("not json".to_string())),
            CannedGenerator(Ok(r#"{"overallScore": 10}"#.to_string())),
        ] {
            let enricher = AnalysisEnricher::new(Arc::new(generator));
            let analysis = enricher.enrich(&Brief::new(), &report).await;
            assert_eq!(analysis, local_enriched_analysis(&report));
        }
    }
}
