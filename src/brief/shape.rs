// Single-step shape detection for brief field values

use serde_json::{Map, Value};

/// The shape of a field value, resolved once so heuristics can match on it
/// instead of re-inspecting JSON types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// Absent, null, `[]` or `{}`
    Empty,
    Text(&'a str),
    /// Non-empty array of strings
    TextList(&'a [Value]),
    /// Non-empty array containing at least one non-string element
    ObjectList(&'a [Value]),
    /// Non-empty object
    Record(&'a Map<String, Value>),
    /// Numbers and booleans
    Other,
}

impl<'a> FieldShape<'a> {
    pub fn detect(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldShape::Empty,
            Some(Value::String(s)) => FieldShape::Text(s),
            Some(Value::Array(items)) if items.is_empty() => FieldShape::Empty,
            Some(Value::Array(items)) => {
                if items.iter().all(Value::is_string) {
                    FieldShape::TextList(items)
                } else {
                    FieldShape::ObjectList(items)
                }
            }
            Some(Value::Object(map)) if map.is_empty() => FieldShape::Empty,
            Some(Value::Object(map)) => FieldShape::Record(map),
            Some(Value::Bool(_)) | Some(Value::Number(_)) => FieldShape::Other,
        }
    }

    pub fn of(value: &'a Value) -> Self {
        Self::detect(Some(value))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldShape::Empty)
    }

    /// Element count for either list shape
    pub fn list_len(&self) -> Option<usize> {
        match self {
            FieldShape::TextList(items) | FieldShape::ObjectList(items) => Some(items.len()),
            _ => None,
        }
    }
}
