//! Render readiness of visualisation specs.
//!
//! Each chart type needs its dataset loaded and a handful of spec roles
//! filled before the viewer can draw anything:
//!
//! | type          | dataset loaded | required roles                 |
//! |---------------|----------------|--------------------------------|
//! | map           | no             | none                           |
//! | pivot table   | yes            | none                           |
//! | bar           | yes            | metricColumnY, bucketColumn    |
//! | line, area    | yes            | metricColumnY, metricColumnX   |
//! | pie, donut    | yes            | bucketColumn                   |
//! | scatter       | yes            | metricColumnX, metricColumnY   |
//!
//! Unknown types are never renderable. That is not an error, the
//! visualisation is simply not ready yet.

use serde::Serialize;
use vizboard_model::{Spec, SpecField, Visualisation, VisualisationType};

use crate::lookup::DatasetLookup;

/// What a chart type needs before it can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Nothing is checked at this gate (maps describe their own layers).
    Ungated,
    /// The primary dataset must be loaded and these roles set.
    Dataset { fields: &'static [SpecField] },
    /// Type the client does not know how to render.
    Unknown,
}

const NO_FIELDS: &[SpecField] = &[];
const BAR_FIELDS: &[SpecField] = &[SpecField::MetricColumnY, SpecField::BucketColumn];
const LINE_FIELDS: &[SpecField] = &[SpecField::MetricColumnY, SpecField::MetricColumnX];
const PIE_FIELDS: &[SpecField] = &[SpecField::BucketColumn];
const SCATTER_FIELDS: &[SpecField] = &[SpecField::MetricColumnX, SpecField::MetricColumnY];

/// Requirement for a chart type.
#[must_use]
pub fn requirement(visualisation_type: &VisualisationType) -> Requirement {
    match visualisation_type {
        VisualisationType::Map => Requirement::Ungated,
        VisualisationType::PivotTable => Requirement::Dataset { fields: NO_FIELDS },
        VisualisationType::Bar => Requirement::Dataset { fields: BAR_FIELDS },
        VisualisationType::Line | VisualisationType::Area => {
            Requirement::Dataset { fields: LINE_FIELDS }
        }
        VisualisationType::Pie | VisualisationType::Donut => {
            Requirement::Dataset { fields: PIE_FIELDS }
        }
        VisualisationType::Scatter => Requirement::Dataset {
            fields: SCATTER_FIELDS,
        },
        VisualisationType::Other(_) => Requirement::Unknown,
    }
}

/// Outcome of the readiness check, with the reason when not ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    UnknownType { visualisation_type: String },
    DatasetNotLoaded { dataset_id: Option<String> },
    MissingFields { fields: Vec<&'static str> },
}

impl Readiness {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Check whether a visualisation can be rendered with the datasets at hand.
pub fn render_readiness(visualisation: &Visualisation, datasets: &impl DatasetLookup) -> Readiness {
    let fields = match requirement(&visualisation.visualisation_type) {
        Requirement::Ungated => return Readiness::Ready,
        Requirement::Unknown => {
            return Readiness::UnknownType {
                visualisation_type: visualisation.visualisation_type.to_string(),
            };
        }
        Requirement::Dataset { fields } => fields,
    };

    let dataset_loaded = visualisation
        .dataset_id
        .as_deref()
        .is_some_and(|id| datasets.is_dataset_loaded(id));
    if !dataset_loaded {
        return Readiness::DatasetNotLoaded {
            dataset_id: visualisation.dataset_id.clone(),
        };
    }

    let missing = missing_fields(&visualisation.spec, fields);
    if missing.is_empty() {
        Readiness::Ready
    } else {
        Readiness::MissingFields {
            fields: missing.into_iter().map(SpecField::key).collect(),
        }
    }
}

/// Whether a visualisation can be rendered right now.
pub fn is_renderable(visualisation: &Visualisation, datasets: &impl DatasetLookup) -> bool {
    render_readiness(visualisation, datasets).is_ready()
}

/// Whether a spec carries enough roles to be sent to the API.
///
/// Same role rules as rendering, without the dataset load condition.
#[must_use]
pub fn spec_is_valid_for_api(spec: &Spec, visualisation_type: &VisualisationType) -> bool {
    match requirement(visualisation_type) {
        Requirement::Ungated => true,
        Requirement::Unknown => false,
        Requirement::Dataset { fields } => missing_fields(spec, fields).is_empty(),
    }
}

fn missing_fields(spec: &Spec, fields: &[SpecField]) -> Vec<SpecField> {
    fields
        .iter()
        .copied()
        .filter(|field| !spec.has_field(*field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn vis(ty: VisualisationType, spec: Spec) -> Visualisation {
        Visualisation {
            id: "v1".to_string(),
            name: "Test".to_string(),
            visualisation_type: ty,
            dataset_id: Some("d1".to_string()),
            spec,
            modified: None,
            status: None,
        }
    }

    fn loaded() -> HashSet<String> {
        HashSet::from(["d1".to_string()])
    }

    #[test]
    fn test_map_is_ungated() {
        let mut map = vis(VisualisationType::Map, Spec::default());
        map.dataset_id = None;
        assert!(is_renderable(&map, &HashSet::new()));
    }

    #[test]
    fn test_pivot_table_needs_only_dataset() {
        let pivot = vis(VisualisationType::PivotTable, Spec::default());
        assert!(is_renderable(&pivot, &loaded()));
        assert_eq!(
            render_readiness(&pivot, &HashSet::new()),
            Readiness::DatasetNotLoaded {
                dataset_id: Some("d1".to_string())
            }
        );
    }

    #[test]
    fn test_bar_reports_missing_bucket() {
        let spec = Spec {
            metric_column_y: Some("c2".to_string()),
            ..Spec::default()
        };
        let bar = vis(VisualisationType::Bar, spec);
        assert_eq!(
            render_readiness(&bar, &loaded()),
            Readiness::MissingFields {
                fields: vec!["bucketColumn"]
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        let other = vis(VisualisationType::parse("bubble"), Spec::default());
        assert!(!is_renderable(&other, &loaded()));
        assert!(!spec_is_valid_for_api(&other.spec, &other.visualisation_type));
    }

    #[test]
    fn test_api_validity_ignores_dataset() {
        let spec = Spec {
            bucket_column: Some("c1".to_string()),
            ..Spec::default()
        };
        assert!(spec_is_valid_for_api(&spec, &VisualisationType::Pie));
        assert!(!spec_is_valid_for_api(&spec, &VisualisationType::Scatter));
        assert!(spec_is_valid_for_api(&Spec::default(), &VisualisationType::Map));
    }
}
