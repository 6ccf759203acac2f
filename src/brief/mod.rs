// Brief document model
//
// A brief is an ordered JSON object. Sixteen top-level fields are
// indispensable; everything else (budget, notes, ...) is carried verbatim.

pub mod merge;
pub mod quality;
pub mod shape;

pub use merge::{changed_fields, is_better, merge_briefs, merge_values};
pub use quality::{is_brief_complete, is_field_poor, poor_fields};
pub use shape::FieldShape;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::BriefError;

/// The sixteen indispensable brief fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BriefField {
    Title,
    Summary,
    Positioning,
    Objectives,
    ProblemStatement,
    TargetAudience,
    SuccessMetrics,
    Requirements,
    KeyMessages,
    Timeline,
    ChannelsTactics,
    RiskAnalysis,
    Dependencies,
    Assumptions,
    OutOfScope,
    PhasedPlan,
}

impl BriefField {
    pub const ALL: [BriefField; 16] = [
        BriefField::Title,
        BriefField::Summary,
        BriefField::Positioning,
        BriefField::Objectives,
        BriefField::ProblemStatement,
        BriefField::TargetAudience,
        BriefField::SuccessMetrics,
        BriefField::Requirements,
        BriefField::KeyMessages,
        BriefField::Timeline,
        BriefField::ChannelsTactics,
        BriefField::RiskAnalysis,
        BriefField::Dependencies,
        BriefField::Assumptions,
        BriefField::OutOfScope,
        BriefField::PhasedPlan,
    ];

    /// JSON key used in the document
    pub fn key(self) -> &'static str {
        match self {
            BriefField::Title => "title",
            BriefField::Summary => "summary",
            BriefField::Positioning => "positioning",
            BriefField::Objectives => "objectives",
            BriefField::ProblemStatement => "problemStatement",
            BriefField::TargetAudience => "targetAudience",
            BriefField::SuccessMetrics => "successMetrics",
            BriefField::Requirements => "requirements",
            BriefField::KeyMessages => "keyMessages",
            BriefField::Timeline => "timeline",
            BriefField::ChannelsTactics => "channelsTactics",
            BriefField::RiskAnalysis => "riskAnalysis",
            BriefField::Dependencies => "dependencies",
            BriefField::Assumptions => "assumptions",
            BriefField::OutOfScope => "outOfScope",
            BriefField::PhasedPlan => "phasedPlan",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            BriefField::Title => "Title",
            BriefField::Summary => "Summary",
            BriefField::Positioning => "Positioning",
            BriefField::Objectives => "Objectives",
            BriefField::ProblemStatement => "Problem statement",
            BriefField::TargetAudience => "Target audience",
            BriefField::SuccessMetrics => "Success metrics",
            BriefField::Requirements => "Requirements",
            BriefField::KeyMessages => "Key messages",
            BriefField::Timeline => "Timeline",
            BriefField::ChannelsTactics => "Channels & tactics",
            BriefField::RiskAnalysis => "Risk analysis",
            BriefField::Dependencies => "Dependencies",
            BriefField::Assumptions => "Assumptions",
            BriefField::OutOfScope => "Out of scope",
            BriefField::PhasedPlan => "Phased plan",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for BriefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A brief document. Field order is preserved through parse, merge and save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brief(Map<String, Value>);

impl Brief {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn field(&self, field: BriefField) -> Option<&Value> {
        self.0.get(field.key())
    }

    /// Builder-style insert, used when assembling documents by hand.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Parse a brief from JSON text. The top level must be an object.
    pub fn from_json_str(text: &str) -> Result<Self, BriefError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| BriefError::Parse(e.to_string()))?;
        Self::try_from(value)
    }

    pub fn to_pretty_json(&self) -> String {
        // Serializing a Map of Values cannot fail
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<Map<String, Value>> for Brief {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Brief {
    type Error = BriefError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(BriefError::Validation(format!(
                "brief must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
