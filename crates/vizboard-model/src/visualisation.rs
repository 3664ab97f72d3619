//! Visualisations and their chart types.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::spec::{Spec, null_as_default};

/// Milliseconds since the Unix epoch, as exchanged with the API.
pub type Timestamp = i64;

/// Current time as an API timestamp.
#[must_use]
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// Chart type of a visualisation.
///
/// Unknown type names are kept verbatim in [`VisualisationType::Other`] so
/// they survive a fetch/save round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisualisationType {
    Bar,
    Line,
    Area,
    Pie,
    Donut,
    Scatter,
    Map,
    PivotTable,
    Other(String),
}

impl VisualisationType {
    /// All chart types the client knows how to render.
    pub const KNOWN: [VisualisationType; 8] = [
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Donut,
        Self::Scatter,
        Self::Map,
        Self::PivotTable,
    ];

    /// Parse a type name as sent by the API.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "bar" => Self::Bar,
            "line" => Self::Line,
            "area" => Self::Area,
            "pie" => Self::Pie,
            "donut" => Self::Donut,
            "scatter" => Self::Scatter,
            "map" => Self::Map,
            "pivot table" => Self::PivotTable,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire name of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Scatter => "scatter",
            Self::Map => "map",
            Self::PivotTable => "pivot table",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map)
    }

    /// Label shown in library listings: `Map` for maps, `<Type> chart` otherwise.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.is_map() {
            return "Map".to_string();
        }
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} chart", first.to_uppercase(), chars.as_str()),
            None => "chart".to_string(),
        }
    }

    /// CSS-style class name (spaces removed), e.g. `pivottable`.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.as_str().replace(' ', "")
    }
}

impl From<String> for VisualisationType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<VisualisationType> for String {
    fn from(value: VisualisationType) -> Self {
        match value {
            VisualisationType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VisualisationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence status of the local copy of a visualisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// A save is in flight; the server has not confirmed this copy yet.
    Pending,
    /// The server confirmed this copy.
    Ok,
}

/// A visualisation as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualisation {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub visualisation_type: VisualisationType,

    /// Primary dataset. Maps may leave this empty and reference datasets per layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: Spec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Visualisation {
    /// Copy of this visualisation carrying a new status and modification time.
    #[must_use]
    pub fn stamped(&self, status: Status, modified: Timestamp) -> Self {
        Self {
            status: Some(status),
            modified: Some(modified),
            ..self.clone()
        }
    }

    /// Modification time as a UTC date, when present and in range.
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Some(Status::Pending)
    }
}

/// Payload for creating a visualisation; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualisationDraft {
    #[serde(default)]
    pub name: String,

    pub visualisation_type: VisualisationType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: Spec,
}

impl VisualisationDraft {
    pub fn new(name: impl Into<String>, visualisation_type: VisualisationType) -> Self {
        Self {
            name: name.into(),
            visualisation_type,
            dataset_id: None,
            spec: Spec::default(),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    #[must_use]
    pub fn with_spec(mut self, spec: Spec) -> Self {
        self.spec = spec;
        self
    }
}
