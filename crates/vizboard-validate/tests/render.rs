//! Integration tests for render readiness and the preview gate.

use std::collections::HashMap;

use proptest::prelude::*;
use serde_json::json;
use vizboard_model::{Dataset, DatasetMap, Spec, SpecField, Visualisation, VisualisationType};
use vizboard_validate::{
    is_renderable, resolve_dataset_ids, should_mount_viewer, spec_is_valid_for_api,
};

fn visualisation(ty: VisualisationType, spec: Spec) -> Visualisation {
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

fn loaded_datasets() -> DatasetMap {
    let dataset: Dataset = serde_json::from_value(json!({
        "id": "d1",
        "columns": [{"columnName": "c1", "title": "Region", "type": "text"}]
    }))
    .unwrap();
    HashMap::from([("d1".to_string(), dataset)])
}

fn full_spec() -> Spec {
    Spec {
        metric_column_x: Some("c1".to_string()),
        metric_column_y: Some("c2".to_string()),
        bucket_column: Some("c3".to_string()),
        ..Spec::default()
    }
}

fn without(spec: &Spec, field: SpecField) -> Spec {
    let mut spec = spec.clone();
    match field {
        SpecField::MetricColumnX => spec.metric_column_x = None,
        SpecField::MetricColumnY => spec.metric_column_y = None,
        SpecField::BucketColumn => spec.bucket_column = None,
    }
    spec
}

#[test]
fn test_every_known_chart_renders_with_full_spec() {
    let datasets = loaded_datasets();
    for ty in VisualisationType::KNOWN {
        let vis = visualisation(ty.clone(), full_spec());
        assert!(is_renderable(&vis, &datasets), "{ty} should render");
    }
}

#[test]
fn test_required_fields_per_type() {
    let datasets = loaded_datasets();
    let cases = [
        (VisualisationType::Bar, SpecField::BucketColumn),
        (VisualisationType::Bar, SpecField::MetricColumnY),
        (VisualisationType::Line, SpecField::MetricColumnX),
        (VisualisationType::Area, SpecField::MetricColumnY),
        (VisualisationType::Pie, SpecField::BucketColumn),
        (VisualisationType::Donut, SpecField::BucketColumn),
        (VisualisationType::Scatter, SpecField::MetricColumnX),
        (VisualisationType::Scatter, SpecField::MetricColumnY),
    ];
    for (ty, field) in cases {
        let vis = visualisation(ty.clone(), without(&full_spec(), field));
        assert!(!is_renderable(&vis, &datasets), "{ty} without {field}");
        assert!(!spec_is_valid_for_api(&vis.spec, &ty), "{ty} without {field}");
    }
}

#[test]
fn test_fields_not_required_by_type_are_ignored() {
    let datasets = loaded_datasets();
    let pie = visualisation(
        VisualisationType::Pie,
        without(&without(&full_spec(), SpecField::MetricColumnX), SpecField::MetricColumnY),
    );
    assert!(is_renderable(&pie, &datasets));
}

#[test]
fn test_unloaded_dataset_blocks_charts_but_not_maps() {
    let mut datasets = loaded_datasets();
    datasets.insert("d1".to_string(), Dataset::reference("d1"));
    let bar = visualisation(VisualisationType::Bar, full_spec());
    assert!(!should_mount_viewer(&bar, &datasets));

    let map = visualisation(VisualisationType::Map, Spec::default());
    assert!(should_mount_viewer(&map, &datasets));
}

#[test]
fn test_gate_follows_dataset_loading() {
    let bar = visualisation(VisualisationType::Bar, full_spec());
    let mut datasets = DatasetMap::new();
    assert!(!should_mount_viewer(&bar, &datasets));
    datasets.extend(loaded_datasets());
    assert!(should_mount_viewer(&bar, &datasets));
}

#[test]
fn test_map_layer_dependencies_from_json() {
    let vis: Visualisation = serde_json::from_value(json!({
        "id": "m1",
        "visualisationType": "map",
        "datasetId": "p",
        "spec": {"layers": [
            {"datasetId": "a"},
            {"aggregationDataset": "b"},
            {"datasetId": "a", "aggregationDataset": "p"}
        ]}
    }))
    .unwrap();
    let ids: Vec<_> = resolve_dataset_ids(&vis).into_iter().collect();
    assert_eq!(ids, vec!["a", "b", "p"]);
}

proptest! {
    #[test]
    fn prop_unknown_types_never_render(name in "[a-z ]{0,12}") {
        let ty = VisualisationType::parse(&name);
        prop_assume!(!ty.is_known());
        let vis = visualisation(ty, full_spec());
        prop_assert!(!is_renderable(&vis, &loaded_datasets()));
    }

    #[test]
    fn prop_layer_ids_form_a_set(ids in proptest::collection::vec("[a-c]", 0..8)) {
        let layers = ids
            .iter()
            .map(|id| vizboard_model::Layer::with_dataset(id.clone()))
            .collect();
        let mut vis = visualisation(VisualisationType::Map, Spec { layers, ..Spec::default() });
        vis.dataset_id = None;
        let resolved = resolve_dataset_ids(&vis);
        let mut expected = ids.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(resolved.into_iter().collect::<Vec<_>>(), expected);
    }
}
