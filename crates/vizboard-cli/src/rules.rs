//! Parsing of `--map` rules for the `derive-category` command.
//!
//! Text rules list source values: `North,South=Coastal`.
//! Number rules list conditions joined by `&`: `>=18&<65=Adult`.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use vizboard_transform::derive_category::{
    Comparison, MappingKind, Mappings, NumberCondition, NumberMapping, TextMapping,
    ValueOccurrence,
};

/// Build the mapping list for a source column from its `--map` rules.
pub fn build_mappings(
    kind: MappingKind,
    rules: &[String],
    occurrences: &[ValueOccurrence],
) -> Result<Mappings> {
    match kind {
        MappingKind::Text => rules
            .iter()
            .map(|rule| parse_text_rule(rule, occurrences))
            .collect::<Result<Vec<_>>>()
            .map(Mappings::Text),
        MappingKind::Number => rules
            .iter()
            .map(String::as_str)
            .map(parse_number_rule)
            .collect::<Result<Vec<_>>>()
            .map(Mappings::Number),
    }
}

fn split_rule(rule: &str) -> Result<(&str, &str)> {
    rule.rsplit_once('=')
        .filter(|(left, _)| !left.is_empty() && !left.ends_with(['<', '>', '=']))
        .ok_or_else(|| anyhow!("rule `{rule}` must look like `<values>=<category>`"))
}

/// Parse a text rule against the values present in the column.
pub fn parse_text_rule(rule: &str, occurrences: &[ValueOccurrence]) -> Result<TextMapping> {
    let (values, category) = split_rule(rule)?;
    let matched = values
        .split(',')
        .map(str::trim)
        .map(|wanted| {
            occurrences
                .iter()
                .find(|occurrence| display_value(&occurrence.value) == wanted)
                .cloned()
                .ok_or_else(|| anyhow!("value `{wanted}` does not occur in the column"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TextMapping::new(matched, category.trim()))
}

/// Parse a number rule such as `>=18&<65=Adult`.
pub fn parse_number_rule(rule: &str) -> Result<NumberMapping> {
    let (conditions, category) = split_rule(rule)?;
    let conditions = conditions
        .split('&')
        .map(|condition| parse_condition(condition.trim()))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("in rule `{rule}`"))?;
    Ok(NumberMapping::new(conditions, category.trim()))
}

fn parse_condition(condition: &str) -> Result<NumberCondition> {
    const OPERATORS: [(&str, Comparison); 5] = [
        (">=", Comparison::Gte),
        ("<=", Comparison::Lte),
        (">", Comparison::Gt),
        ("<", Comparison::Lt),
        ("=", Comparison::Eq),
    ];
    let Some((op, rest)) = OPERATORS
        .iter()
        .find_map(|(prefix, op)| condition.strip_prefix(*prefix).map(|rest| (*op, rest)))
    else {
        bail!("condition `{condition}` must start with one of >=, <=, >, <, =");
    };
    let value = rest
        .trim()
        .parse::<f64>()
        .with_context(|| format!("`{}` is not a number", rest.trim()))?;
    Ok(NumberCondition { op, value })
}

/// How a cell value is written on the command line.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_operators() {
        let condition = parse_condition(">= 18").unwrap();
        assert_eq!(condition.op, Comparison::Gte);
        assert!((condition.value - 18.0).abs() < f64::EPSILON);
        assert!(parse_condition("~3").is_err());
        assert!(parse_condition("<abc").is_err());
    }

    #[test]
    fn test_rule_needs_category() {
        assert!(parse_number_rule(">=18").is_err());
        assert!(parse_number_rule("Adult").is_err());
    }
}
