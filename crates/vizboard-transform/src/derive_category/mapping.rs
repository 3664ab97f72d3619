//! Category mappings: rules that assign source values to target categories.

use std::fmt;

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use vizboard_model::ColumnType;

use crate::error::{Result, TransformError};

/// Which family of mappings a source column uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    Text,
    Number,
}

impl MappingKind {
    /// Mapping family for a column type. Only text and number columns qualify.
    pub fn for_column_type(column_type: &ColumnType) -> Result<Self> {
        match column_type {
            ColumnType::Text => Ok(Self::Text),
            ColumnType::Number => Ok(Self::Number),
            other => Err(TransformError::UnsupportedColumnType(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A distinct source value and how often it occurs in the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(Value, usize)")]
pub struct ValueOccurrence {
    pub value: Value,
    pub count: usize,
}

impl ValueOccurrence {
    pub fn new(value: impl Into<Value>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

impl From<(Value, usize)> for ValueOccurrence {
    fn from((value, count): (Value, usize)) -> Self {
        Self { value, count }
    }
}

impl Serialize for ValueOccurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.count)?;
        tuple.end()
    }
}

/// Text rule: the listed values become `category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMapping {
    pub occurrences: Vec<ValueOccurrence>,
    pub category: Option<String>,
}

impl TextMapping {
    pub fn new(occurrences: Vec<ValueOccurrence>, category: impl Into<String>) -> Self {
        Self {
            occurrences,
            category: Some(category.into()),
        }
    }

    /// Source values without their counts.
    #[must_use]
    pub fn raw_values(&self) -> Vec<Value> {
        self.occurrences
            .iter()
            .map(|occurrence| occurrence.value.clone())
            .collect()
    }
}

/// Comparison used by numeric rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "=")]
    Eq,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Self::Gt => left > right,
            Self::Gte => left >= right,
            Self::Lt => left < right,
            Self::Lte => left <= right,
            Self::Eq => (left - right).abs() < f64::EPSILON,
        }
    }
}

/// One bound of a numeric rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberCondition {
    pub op: Comparison,
    pub value: f64,
}

/// Numeric rule: values meeting every condition become `category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberMapping {
    pub conditions: Vec<NumberCondition>,
    pub category: Option<String>,
}

impl NumberMapping {
    pub fn new(conditions: Vec<NumberCondition>, category: impl Into<String>) -> Self {
        Self {
            conditions,
            category: Some(category.into()),
        }
    }

    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.op.holds(value, condition.value))
    }
}

/// The ordered mapping list of a derive-category transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "mappings", rename_all = "lowercase")]
pub enum Mappings {
    Text(Vec<TextMapping>),
    Number(Vec<NumberMapping>),
}

impl Mappings {
    #[must_use]
    pub fn empty(kind: MappingKind) -> Self {
        match kind {
            MappingKind::Text => Self::Text(Vec::new()),
            MappingKind::Number => Self::Number(Vec::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MappingKind {
        match self {
            Self::Text(_) => MappingKind::Text,
            Self::Number(_) => MappingKind::Number,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(mappings) => mappings.len(),
            Self::Number(mappings) => mappings.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Target category of each rule, in order.
    #[must_use]
    pub fn categories(&self) -> Vec<Option<&str>> {
        match self {
            Self::Text(mappings) => mappings.iter().map(|m| m.category.as_deref()).collect(),
            Self::Number(mappings) => mappings.iter().map(|m| m.category.as_deref()).collect(),
        }
    }

    /// Rename the target category of one rule.
    pub fn set_category(&mut self, index: usize, category: Option<String>) -> Result<()> {
        let len = self.len();
        let slot = match self {
            Self::Text(mappings) => mappings.get_mut(index).map(|m| &mut m.category),
            Self::Number(mappings) => mappings.get_mut(index).map(|m| &mut m.category),
        };
        let slot = slot.ok_or(TransformError::MappingIndexOutOfRange { index, len })?;
        *slot = category;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_for_column_type() {
        assert_eq!(
            MappingKind::for_column_type(&ColumnType::Text).unwrap(),
            MappingKind::Text
        );
        assert!(matches!(
            MappingKind::for_column_type(&ColumnType::Date),
            Err(TransformError::UnsupportedColumnType(name)) if name == "date"
        ));
    }

    #[test]
    fn test_occurrence_is_a_pair() {
        let occurrence = ValueOccurrence::new("North", 3);
        assert_eq!(serde_json::to_value(&occurrence).unwrap(), json!(["North", 3]));
        let back: ValueOccurrence = serde_json::from_value(json!(["North", 3])).unwrap();
        assert_eq!(back, occurrence);
    }

    #[test]
    fn test_number_rule_matching() {
        let rule = NumberMapping::new(
            vec![
                NumberCondition {
                    op: Comparison::Gte,
                    value: 10.0,
                },
                NumberCondition {
                    op: Comparison::Lt,
                    value: 20.0,
                },
            ],
            "Teens",
        );
        assert!(rule.matches(10.0));
        assert!(rule.matches(19.5));
        assert!(!rule.matches(20.0));
    }

    #[test]
    fn test_set_category_out_of_range() {
        let mut mappings = Mappings::empty(MappingKind::Text);
        assert!(matches!(
            mappings.set_category(0, Some("A".to_string())),
            Err(TransformError::MappingIndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
