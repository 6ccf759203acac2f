// Merge engine: reconcile a brief with a proposed update without regressing
//
// The original's keys drive the walk. A value is replaced only when the
// candidate is strictly better under `is_better`; keys the candidate adds are
// appended, keys it omits are kept.

use serde_json::{Map, Value};

use super::shape::FieldShape;
use super::Brief;

/// Whether `new` should replace `old`.
///
/// - old absent/empty, new present → true
/// - two texts → longer (in chars) wins
/// - two lists → more elements wins (content quality is not compared)
/// - two records → more keys wins
/// - everything else, including ties and mismatched shapes → false
pub fn is_better(new: Option<&Value>, old: Option<&Value>) -> bool {
    let new_shape = FieldShape::detect(new);
    let old_shape = FieldShape::detect(old);

    match (new_shape, old_shape) {
        (FieldShape::Empty, _) => false,
        (_, FieldShape::Empty) => true,
        (FieldShape::Text(n), FieldShape::Text(o)) => n.chars().count() > o.chars().count(),
        (FieldShape::Record(n), FieldShape::Record(o)) => n.len() > o.len(),
        (n, o) => match (n.list_len(), o.list_len()) {
            (Some(n_len), Some(o_len)) => n_len > o_len,
            _ => false,
        },
    }
}

/// Merge `improved` into `original`, returning a new brief.
pub fn merge_briefs(original: &Brief, improved: &Brief) -> Brief {
    Brief::from(merge_maps(original.as_map(), improved.as_map()))
}

/// Merge two arbitrary values. A null operand resolves to the other side.
pub fn merge_values(original: &Value, improved: &Value) -> Value {
    match (original, improved) {
        (Value::Null, other) | (other, Value::Null) => other.clone(),
        (Value::Object(o), Value::Object(i)) => Value::Object(merge_maps(o, i)),
        (o, i) => {
            if is_better(Some(i), Some(o)) {
                i.clone()
            } else {
                o.clone()
            }
        }
    }
}

fn merge_maps(original: &Map<String, Value>, improved: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = Map::with_capacity(original.len().max(improved.len()));

    for (key, old) in original {
        let value = match (old, improved.get(key)) {
            (Value::Object(o), Some(Value::Object(i))) => Value::Object(merge_maps(o, i)),
            (old, candidate) => {
                if is_better(candidate, Some(old)) {
                    candidate.cloned().unwrap_or_else(|| old.clone())
                } else {
                    old.clone()
                }
            }
        };
        merged.insert(key.clone(), value);
    }

    for (key, value) in improved {
        if !original.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Top-level keys whose values differ between two briefs, in `after` order
/// followed by keys that disappeared.
pub fn changed_fields(before: &Brief, after: &Brief) -> Vec<String> {
    let mut changed: Vec<String> = after
        .as_map()
        .iter()
        .filter(|(key, value)| before.get(key) != Some(*value))
        .map(|(key, _)| key.clone())
        .collect();

    changed.extend(
        before
            .keys()
            .filter(|key| after.get(key).is_none())
            .map(str::to_string),
    );
    changed
}
