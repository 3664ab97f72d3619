//! Integration tests for `--map` rule parsing.

use serde_json::json;
use vizboard_cli::rules::{build_mappings, display_value, parse_text_rule};
use vizboard_transform::derive_category::{
    Comparison, MappingKind, Mappings, ValueOccurrence, occurrences_of,
};

fn region_values() -> Vec<ValueOccurrence> {
    occurrences_of(&[
        json!("North"),
        json!("South"),
        json!("North"),
        json!(3),
        json!(null),
    ])
}

#[test]
fn text_rules_match_column_values() {
    let rules = vec!["North, South=Mainland".to_string(), "3=Islands".to_string()];
    let mappings = build_mappings(MappingKind::Text, &rules, &region_values()).unwrap();

    let Mappings::Text(mappings) = mappings else {
        panic!("expected text mappings");
    };
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0].category.as_deref(), Some("Mainland"));
    assert_eq!(mappings[0].raw_values(), vec![json!("North"), json!("South")]);
    assert_eq!(mappings[0].occurrences[0].count, 2);
    assert_eq!(mappings[1].raw_values(), vec![json!(3)]);
}

#[test]
fn unknown_text_value_is_rejected() {
    let err = parse_text_rule("West=Other", &region_values()).unwrap_err();
    assert!(err.to_string().contains("West"));
}

#[test]
fn number_rules_parse_conditions() {
    let rules = vec![">=18&<65=Adult".to_string(), "<18=Minor".to_string()];
    let mappings = build_mappings(MappingKind::Number, &rules, &[]).unwrap();

    let Mappings::Number(mappings) = mappings else {
        panic!("expected number mappings");
    };
    assert_eq!(mappings[0].conditions.len(), 2);
    assert_eq!(mappings[0].conditions[0].op, Comparison::Gte);
    assert_eq!(mappings[0].conditions[1].op, Comparison::Lt);
    assert!(mappings[0].matches(30.0));
    assert!(!mappings[0].matches(70.0));
    assert_eq!(mappings[1].category.as_deref(), Some("Minor"));
}

#[test]
fn malformed_number_rule_is_rejected() {
    let rules = vec![">=eighteen=Adult".to_string()];
    assert!(build_mappings(MappingKind::Number, &rules, &[]).is_err());
}

#[test]
fn values_display_without_quotes() {
    assert_eq!(display_value(&json!("North")), "North");
    assert_eq!(display_value(&json!(3)), "3");
    assert_eq!(display_value(&json!(null)), "");
}
