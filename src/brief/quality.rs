// Field quality heuristic: is a value too thin to be useful?

use serde_json::Value;

use super::shape::FieldShape;
use super::{Brief, BriefField};

/// Minimum trimmed character count for a text value to count as substantive
pub const MIN_TEXT_CHARS: usize = 5;

/// Minimum element count for a list of strings
pub const MIN_LIST_ITEMS: usize = 2;

/// Classify a field value as poor (absent, placeholder, too thin).
///
/// Total over every JSON value: never panics, no allocation beyond recursion.
pub fn is_field_poor(value: Option<&Value>) -> bool {
    match FieldShape::detect(value) {
        FieldShape::Empty => true,
        FieldShape::Text(text) => is_text_poor(text),
        FieldShape::TextList(items) => {
            items.len() < MIN_LIST_ITEMS
                || items
                    .iter()
                    .any(|item| item.as_str().map_or(true, |s| s.trim().is_empty()))
        }
        // Only string leaves are judged; nested objects are not poor as a whole
        FieldShape::ObjectList(items) => items.iter().any(has_poor_string_leaf),
        FieldShape::Record(map) => map.values().any(|v| is_field_poor(Some(v))),
        FieldShape::Other => false,
    }
}

fn is_text_poor(text: &str) -> bool {
    text.trim().chars().count() < MIN_TEXT_CHARS
}

fn has_poor_string_leaf(value: &Value) -> bool {
    match value {
        Value::String(s) => is_text_poor(s),
        Value::Array(items) => items.iter().any(has_poor_string_leaf),
        Value::Object(map) => map.values().any(has_poor_string_leaf),
        _ => false,
    }
}

/// True iff none of the indispensable fields are poor. `None` is never complete.
pub fn is_brief_complete(brief: Option<&Brief>) -> bool {
    match brief {
        Some(brief) => BriefField::ALL
            .iter()
            .all(|field| !is_field_poor(brief.field(*field))),
        None => false,
    }
}

/// Indispensable fields that are currently poor, in canonical order.
pub fn poor_fields(brief: &Brief) -> Vec<BriefField> {
    BriefField::ALL
        .iter()
        .copied()
        .filter(|field| is_field_poor(brief.field(*field)))
        .collect()
}
