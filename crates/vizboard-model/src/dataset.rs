//! Datasets as seen by the client: an id plus lazily loaded columns and rows.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::visualisation::Timestamp;

/// Datasets known to the client, keyed by id.
pub type DatasetMap = HashMap<String, Dataset>;

/// Data type of a dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    Other(String),
}

impl ColumnType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "date" => Self::Date,
            _ => Self::Other(value),
        }
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dataset column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(
        column_name: impl Into<String>,
        title: impl Into<String>,
        column_type: ColumnType,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            title: Some(title.into()),
            column_type,
        }
    }

    /// Title to show for this column; blank titles do not count.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.trim().is_empty())
    }
}

/// A dataset reference, populated as the API returns more of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<Value>>>,

    /// When the dataset contents last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    /// An unloaded reference to a dataset.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A dataset is loaded once its columns are known.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.columns.is_some()
    }

    #[must_use]
    pub fn has_rows(&self) -> bool {
        self.rows.is_some()
    }

    #[must_use]
    pub fn column(&self, column_name: &str) -> Option<&Column> {
        self.columns
            .as_ref()?
            .iter()
            .find(|column| column.column_name == column_name)
    }

    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.columns
            .as_ref()?
            .iter()
            .position(|column| column.column_name == column_name)
    }

    /// Cells of one column, in row order. Short rows yield `Value::Null`.
    #[must_use]
    pub fn column_values(&self, column_name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(column_name)?;
        let rows = self.rows.as_ref()?;
        Some(
            rows.iter()
                .map(|row| row.get(index).unwrap_or(&Value::Null))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        serde_json::from_value(json!({
            "id": "d1",
            "name": "Survey",
            "columns": [
                {"columnName": "c1", "title": "Region", "type": "text"},
                {"columnName": "c2", "title": "  ", "type": "number"},
                {"columnName": "c3", "type": "geopoint"}
            ],
            "rows": [["North", 1], ["South"]]
        }))
        .expect("parse dataset")
    }

    #[test]
    fn test_loaded_iff_columns_present() {
        assert!(!Dataset::reference("d1").is_loaded());
        assert!(sample().is_loaded());
    }

    #[test]
    fn test_column_lookup() {
        let dataset = sample();
        assert_eq!(dataset.column("c1").and_then(Column::display_title), Some("Region"));
        assert_eq!(dataset.column("c2").and_then(Column::display_title), None);
        assert_eq!(
            dataset.column("c3").map(|c| c.column_type.clone()),
            Some(ColumnType::Other("geopoint".to_string()))
        );
    }

    #[test]
    fn test_column_values_pads_short_rows() {
        let dataset = sample();
        let values = dataset.column_values("c2").expect("values");
        assert_eq!(values, vec![&json!(1), &Value::Null]);
    }
}
