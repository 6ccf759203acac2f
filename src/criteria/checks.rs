// Predicate helpers shared by catalog checks
//
// Brief sections arrive in many shapes: a paragraph, a list of strings, a list
// of records, a record. These helpers flatten them so a check can ask simple
// questions ("how many items", "does any item mention a date").

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid regex"));

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(q[1-4]|h[12]|(19|20)\d{2}|\d{1,2}[/.-]\d{1,2}([/.-]\d{2,4})?|jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may\s+\d{1,4}|\d{1,2}(st|nd|rd|th)?\s+may|june?|july?|aug(ust)?|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?|week\s*\d+|month\s*\d+|day\s*\d+|\d+\s*(days?|weeks?|months?))\b",
    )
    .expect("valid regex")
});

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(tbd|tbc|todo|n/?a|untitled|new brief|placeholder|lorem ipsum|xxx+|\?+|-+)\s*$")
        .expect("valid regex")
});

/// All string and number leaves of a value joined with spaces.
pub fn text_of(value: &Value) -> String {
    let mut out = String::new();
    collect_text(value, &mut out);
    out.trim().to_string()
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => {
            out.push_str(s);
            out.push(' ');
        }
        Value::Number(n) => {
            out.push_str(&n.to_string());
            out.push(' ');
        }
        Value::Array(items) => items.iter().for_each(|v| collect_text(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_text(v, out)),
        Value::Bool(_) | Value::Null => {}
    }
}

/// Logical items of a section.
///
/// Arrays yield their non-blank elements; a text yields one item per non-blank
/// line (bullets are common in pasted briefs); a record is a single item.
pub fn items(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(elements) => elements
            .iter()
            .filter(|v| !text_of(v).is_empty())
            .cloned()
            .collect(),
        Value::String(s) => s
            .lines()
            .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|line| !line.is_empty())
            .map(|line| Value::String(line.to_string()))
            .collect(),
        Value::Object(map) if !map.is_empty() => vec![value.clone()],
        _ => Vec::new(),
    }
}

pub fn item_count(value: &Value) -> usize {
    items(value).len()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| word_count(s) >= 3)
        .count()
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

pub fn has_number(text: &str) -> bool {
    NUMBER_RE.is_match(text)
}

pub fn has_date(text: &str) -> bool {
    DATE_RE.is_match(text)
}

pub fn is_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// True when every item satisfies `pred` (and there is at least one item).
pub fn every_item(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    let items = items(value);
    !items.is_empty() && items.iter().all(pred)
}

pub fn any_item(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    items(value).iter().any(pred)
}

/// Whether an item addresses a topic, either through a record key
/// (`{"mitigation": ...}`) or through its wording.
pub fn item_mentions(item: &Value, keywords: &[&str]) -> bool {
    let key_hit = item
        .as_object()
        .map(|map| {
            map.iter()
                .any(|(k, v)| contains_any(k, keywords) && !text_of(v).is_empty())
        })
        .unwrap_or(false);
    key_hit || contains_any(&text_of(item), keywords)
}

/// Average word count across items
pub fn mean_item_words(value: &Value) -> f64 {
    let items = items(value);
    if items.is_empty() {
        return 0.0;
    }
    let total: usize = items.iter().map(|i| word_count(&text_of(i))).sum();
    total as f64 / items.len() as f64
}
