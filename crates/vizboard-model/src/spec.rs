//! Visualisation specs: the mapping from dataset columns to chart roles.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Type-dependent chart configuration.
///
/// Only the roles the client reasons about are typed; every other key is
/// kept in `extra` so saving a spec never drops configuration. Typed keys
/// that arrive blank (`null` or `[]`) also stay in `extra` and are written
/// back unchanged unless the typed field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Spec {
    pub metric_column_x: Option<String>,

    pub metric_column_y: Option<String>,

    pub bucket_column: Option<String>,

    /// Additional Y series (line and area charts).
    pub metric_columns_y: Vec<String>,

    pub axis_label_y: Option<String>,

    pub axis_label_y_from_user: Option<bool>,

    /// Map layers.
    pub layers: Vec<Layer>,

    pub extra: Map<String, Value>,
}

const METRIC_COLUMN_X: &str = "metricColumnX";
const METRIC_COLUMN_Y: &str = "metricColumnY";
const BUCKET_COLUMN: &str = "bucketColumn";
const METRIC_COLUMNS_Y: &str = "metricColumnsY";
const AXIS_LABEL_Y: &str = "axisLabelY";
const AXIS_LABEL_Y_FROM_USER: &str = "axisLabelYFromUser";
const LAYERS: &str = "layers";
const DATASET_ID: &str = "datasetId";
const AGGREGATION_DATASET: &str = "aggregationDataset";

impl TryFrom<Map<String, Value>> for Spec {
    type Error = ModelError;

    fn try_from(mut raw: Map<String, Value>) -> Result<Self> {
        Ok(Self {
            metric_column_x: take(&mut raw, METRIC_COLUMN_X)?,
            metric_column_y: take(&mut raw, METRIC_COLUMN_Y)?,
            bucket_column: take(&mut raw, BUCKET_COLUMN)?,
            metric_columns_y: take(&mut raw, METRIC_COLUMNS_Y)?.unwrap_or_default(),
            axis_label_y: take(&mut raw, AXIS_LABEL_Y)?,
            axis_label_y_from_user: take(&mut raw, AXIS_LABEL_Y_FROM_USER)?,
            layers: take(&mut raw, LAYERS)?.unwrap_or_default(),
            extra: raw,
        })
    }
}

impl From<Spec> for Map<String, Value> {
    fn from(spec: Spec) -> Self {
        let mut raw = spec.extra;
        put(&mut raw, METRIC_COLUMN_X, spec.metric_column_x.map(Value::String));
        put(&mut raw, METRIC_COLUMN_Y, spec.metric_column_y.map(Value::String));
        put(&mut raw, BUCKET_COLUMN, spec.bucket_column.map(Value::String));
        if !spec.metric_columns_y.is_empty() {
            raw.insert(METRIC_COLUMNS_Y.to_string(), Value::from(spec.metric_columns_y));
        }
        put(&mut raw, AXIS_LABEL_Y, spec.axis_label_y.map(Value::String));
        put(
            &mut raw,
            AXIS_LABEL_Y_FROM_USER,
            spec.axis_label_y_from_user.map(Value::Bool),
        );
        if !spec.layers.is_empty() {
            let layers = spec
                .layers
                .into_iter()
                .map(|layer| Value::Object(layer.into()))
                .collect();
            raw.insert(LAYERS.to_string(), Value::Array(layers));
        }
        raw
    }
}

/// Remove a typed key from `raw` and decode it.
///
/// Blank values stay in `raw` and decode as `None`.
fn take<T: DeserializeOwned>(raw: &mut Map<String, Value>, key: &str) -> Result<Option<T>> {
    let Some(value) = raw.remove(key) else {
        return Ok(None);
    };
    if is_blank(&value) {
        raw.insert(key.to_string(), value);
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

fn put(raw: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        raw.insert(key.to_string(), value);
    }
}

fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_array().is_some_and(Vec::is_empty)
}

/// Deserialize `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Spec {
    /// Column referenced by a chart role, if set.
    #[must_use]
    pub fn field(&self, field: SpecField) -> Option<&str> {
        match field {
            SpecField::MetricColumnX => self.metric_column_x.as_deref(),
            SpecField::MetricColumnY => self.metric_column_y.as_deref(),
            SpecField::BucketColumn => self.bucket_column.as_deref(),
        }
    }

    #[must_use]
    pub fn has_field(&self, field: SpecField) -> bool {
        self.field(field).is_some()
    }

    /// Apply an edit produced by the series menu.
    pub fn apply(&mut self, change: SpecChange) {
        if change.metric_columns_y.is_empty() {
            // an emptied series list is sent as `[]`, not dropped
            self.extra
                .insert(METRIC_COLUMNS_Y.to_string(), Value::Array(Vec::new()));
        }
        self.metric_columns_y = change.metric_columns_y;
        self.axis_label_y = change.axis_label_y;
        self.axis_label_y_from_user = Some(change.axis_label_y_from_user);
    }
}

/// Chart roles that gate rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecField {
    MetricColumnX,
    MetricColumnY,
    BucketColumn,
}

impl SpecField {
    /// Spec key as sent by the API.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MetricColumnX => "metricColumnX",
            Self::MetricColumnY => "metricColumnY",
            Self::BucketColumn => "bucketColumn",
        }
    }
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One layer of a map visualisation. Blank keys are kept like in [`Spec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Layer {
    pub dataset_id: Option<String>,

    pub aggregation_dataset: Option<String>,

    pub extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Layer {
    type Error = ModelError;

    fn try_from(mut raw: Map<String, Value>) -> Result<Self> {
        Ok(Self {
            dataset_id: take(&mut raw, DATASET_ID)?,
            aggregation_dataset: take(&mut raw, AGGREGATION_DATASET)?,
            extra: raw,
        })
    }
}

impl From<Layer> for Map<String, Value> {
    fn from(layer: Layer) -> Self {
        let mut raw = layer.extra;
        put(&mut raw, DATASET_ID, layer.dataset_id.map(Value::String));
        put(
            &mut raw,
            AGGREGATION_DATASET,
            layer.aggregation_dataset.map(Value::String),
        );
        raw
    }
}

impl Layer {
    #[must_use]
    pub fn with_dataset(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: Some(dataset_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_aggregation(aggregation_dataset: impl Into<String>) -> Self {
        Self {
            aggregation_dataset: Some(aggregation_dataset.into()),
            ..Self::default()
        }
    }
}

/// Partial spec update emitted when the Y series list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecChange {
    pub metric_columns_y: Vec<String>,
    pub axis_label_y: Option<String>,
    pub axis_label_y_from_user: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_survive() {
        let json = r#"{"bucketColumn":"c2","sort":"asc","legendTitle":"Region"}"#;
        let spec: Spec = serde_json::from_str(json).expect("parse spec");
        assert_eq!(spec.field(SpecField::BucketColumn), Some("c2"));
        assert_eq!(spec.extra.get("sort"), Some(&Value::from("asc")));

        let back = serde_json::to_value(&spec).expect("serialize spec");
        assert_eq!(back["legendTitle"], "Region");
        assert!(back.get("metricColumnX").is_none());
    }

    #[test]
    fn test_null_fields_are_unset() {
        let spec: Spec =
            serde_json::from_str(r#"{"metricColumnY":null,"bucketColumn":"c1"}"#).unwrap();
        assert!(!spec.has_field(SpecField::MetricColumnY));
        assert!(spec.has_field(SpecField::BucketColumn));
    }

    #[test]
    fn test_layers_parse() {
        let spec: Spec = serde_json::from_str(
            r#"{"layers":[{"datasetId":"a","title":"Points"},{"aggregationDataset":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(spec.layers.len(), 2);
        assert_eq!(spec.layers[0].dataset_id.as_deref(), Some("a"));
        assert_eq!(spec.layers[1].aggregation_dataset.as_deref(), Some("b"));
        assert_eq!(spec.layers[0].extra["title"], "Points");
    }
}
