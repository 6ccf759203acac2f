// Integration tests for the document model: quality heuristic and merge

use briefsmith::brief::{
    changed_fields, is_brief_complete, is_field_poor, merge_briefs, poor_fields, Brief, BriefField,
};
use serde_json::{json, Value};

fn fixture() -> Brief {
    let text = std::fs::read_to_string("tests/fixtures/spring_refresh.json").expect("fixture");
    Brief::from_json_str(&text).expect("fixture parses")
}

fn samples() -> Vec<Brief> {
    vec![
        Brief::new(),
        fixture(),
        Brief::try_from(json!({"title": "AB", "objectives": ["x"]})).unwrap(),
        Brief::try_from(json!({
            "targetAudience": {"primary": {"who": "Parents", "age": 35}, "tags": []},
            "notes": null,
            "budget": 10000
        }))
        .unwrap(),
    ]
}

#[test]
fn test_merge_with_itself_is_identity() {
    for brief in samples() {
        assert_eq!(merge_briefs(&brief, &brief), brief);
    }
}

#[test]
fn test_original_only_keys_survive() {
    let original = fixture();
    let improved = Brief::new().with("title", "A far longer and much more descriptive campaign title");
    let merged = merge_briefs(&original, &improved);

    for key in original.keys().filter(|k| *k != "title") {
        assert_eq!(merged.get(key), original.get(key), "key {key} changed");
    }
    assert_eq!(merged.get("budget"), Some(&json!("EUR 45,000")));
}

#[test]
fn test_merge_scenario_longer_title_and_new_key() {
    let original = Brief::try_from(json!({"title": "AB", "objectives": ["x"]})).unwrap();
    let improved = Brief::try_from(json!({
        "title": "A Proper Campaign Title",
        "objectives": ["x"],
        "budget": "10k"
    }))
    .unwrap();

    let merged = merge_briefs(&original, &improved);
    assert_eq!(merged.get("title"), Some(&json!("A Proper Campaign Title")));
    assert_eq!(merged.get("objectives"), Some(&json!(["x"])));
    assert_eq!(merged.get("budget"), Some(&json!("10k")));
    assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["title", "objectives", "budget"]);
    assert_eq!(changed_fields(&original, &merged), vec!["title", "budget"]);
}

#[test]
fn test_merge_never_regresses_a_good_section() {
    let original = fixture();
    let worse = Brief::try_from(json!({
        "summary": "TBD",
        "objectives": ["Grow"],
        "targetAudience": null,
        "keyMessages": []
    }))
    .unwrap();

    let merged = merge_briefs(&original, &worse);
    assert_eq!(merged, original);
    assert!(is_brief_complete(Some(&merged)));
}

#[test]
fn test_quality_heuristic_is_total() {
    let mut deep = json!("leaf");
    for _ in 0..200 {
        deep = json!({ "nested": deep });
    }
    let values: Vec<Value> = vec![
        Value::Null,
        json!(""),
        json!("   "),
        json!([]),
        json!({}),
        json!(0),
        json!(-1.5),
        json!(true),
        json!(false),
        json!([null, 1, {"a": []}]),
        deep,
    ];
    for value in &values {
        // Must return without panicking
        let _ = is_field_poor(Some(value));
    }
    assert!(!is_field_poor(Some(&json!(0))));
    assert!(!is_field_poor(Some(&json!(false))));
    assert!(is_field_poor(Some(&json!(""))));
}

#[test]
fn test_completeness_matches_poor_fields() {
    for brief in samples() {
        assert_eq!(is_brief_complete(Some(&brief)), poor_fields(&brief).is_empty());
    }
    assert!(!is_brief_complete(None));
}

#[test]
fn test_fixture_is_complete_until_a_section_is_thinned() {
    let brief = fixture();
    assert!(is_brief_complete(Some(&brief)));

    let thinned = brief.clone().with("keyMessages", json!(["Only one message"]));
    assert_eq!(poor_fields(&thinned), vec![BriefField::KeyMessages]);
}
