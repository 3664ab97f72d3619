//! The list of visualisations offered when editing a dashboard.

use chrono::{TimeZone, Utc};
use vizboard_model::{Dashboard, DatasetMap, Visualisation};
use vizboard_validate::spec_is_valid_for_api;

/// The filter input is offered above this many visualisations.
pub const FILTER_INPUT_THRESHOLD: usize = 5;

/// One row of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry<'a> {
    pub visualisation: &'a Visualisation,
    /// `Map`, or `<Type> chart`.
    pub type_label: String,
    pub on_dashboard: bool,
    /// When the underlying dataset last changed, formatted for display.
    pub data_last_updated: Option<String>,
}

/// The list as the dashboard editor shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardList<'a> {
    pub entries: Vec<ListEntry<'a>>,
    pub show_filter_input: bool,
    /// The library has no visualisations at all.
    pub library_empty: bool,
    /// A filter is set and nothing matches it.
    pub no_matches: bool,
}

/// Build the list: persistable visualisations whose name contains
/// `filter_text` (ignoring case), most recently modified first.
pub fn dashboard_list<'a>(
    visualisations: &'a [Visualisation],
    dashboard: &Dashboard,
    datasets: &DatasetMap,
    filter_text: &str,
) -> DashboardList<'a> {
    let needle = filter_text.to_lowercase();
    let mut matching: Vec<&Visualisation> = visualisations
        .iter()
        .filter(|vis| spec_is_valid_for_api(&vis.spec, &vis.visualisation_type))
        .filter(|vis| needle.is_empty() || vis.name.to_lowercase().contains(&needle))
        .collect();
    matching.sort_by(|a, b| b.modified.unwrap_or(0).cmp(&a.modified.unwrap_or(0)));

    let entries: Vec<ListEntry<'a>> = matching
        .into_iter()
        .map(|vis| ListEntry {
            visualisation: vis,
            type_label: vis.visualisation_type.display_label(),
            on_dashboard: dashboard.contains(&vis.id),
            data_last_updated: data_last_updated(vis, datasets),
        })
        .collect();

    DashboardList {
        show_filter_input: visualisations.len() > FILTER_INPUT_THRESHOLD,
        library_empty: visualisations.is_empty(),
        no_matches: !filter_text.is_empty() && entries.is_empty(),
        entries,
    }
}

/// Modification time of the visualisation's dataset. Maps use their first
/// layer's dataset.
#[must_use]
pub fn data_last_updated(visualisation: &Visualisation, datasets: &DatasetMap) -> Option<String> {
    let dataset_id = visualisation.dataset_id.as_deref().or_else(|| {
        visualisation
            .spec
            .layers
            .iter()
            .find_map(|layer| layer.dataset_id.as_deref())
    })?;
    let modified = datasets.get(dataset_id)?.modified?;
    let at = Utc.timestamp_millis_opt(modified).single()?;
    Some(at.format("%b %d, %Y %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vizboard_model::Dataset;

    fn vis(id: &str, name: &str, ty: &str, modified: i64) -> Visualisation {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "visualisationType": ty,
            "datasetId": "d1",
            "spec": {"metricColumnY": "c1", "bucketColumn": "c2", "metricColumnX": "c3"},
            "modified": modified,
        }))
        .unwrap()
    }

    fn library() -> Vec<Visualisation> {
        vec![
            vis("v1", "Sales by region", "bar", 100),
            vis("v2", "Revenue", "line", 300),
            vis("v3", "Regional map", "map", 200),
            serde_json::from_value(json!({
                "id": "v4",
                "name": "Half-built bar",
                "visualisationType": "bar",
                "spec": {"metricColumnY": "c1"},
                "modified": 999,
            }))
            .unwrap(),
        ]
    }

    #[test]
    fn test_hides_invalid_and_sorts_by_modified() {
        let visualisations = library();
        let list = dashboard_list(
            &visualisations,
            &Dashboard::default(),
            &DatasetMap::new(),
            "",
        );
        let ids: Vec<&str> = list
            .entries
            .iter()
            .map(|entry| entry.visualisation.id.as_str())
            .collect();
        assert_eq!(ids, vec!["v2", "v3", "v1"]);
        assert!(!list.show_filter_input);
        assert!(!list.no_matches);
    }

    #[test]
    fn test_filter_ignores_case() {
        let visualisations = library();
        let list = dashboard_list(
            &visualisations,
            &Dashboard::default(),
            &DatasetMap::new(),
            "REGION",
        );
        let ids: Vec<&str> = list
            .entries
            .iter()
            .map(|entry| entry.visualisation.id.as_str())
            .collect();
        assert_eq!(ids, vec!["v3", "v1"]);

        let none = dashboard_list(
            &visualisations,
            &Dashboard::default(),
            &DatasetMap::new(),
            "zzz",
        );
        assert!(none.no_matches);
        assert!(!none.library_empty);
    }

    #[test]
    fn test_labels_and_dashboard_marker() {
        let visualisations = library();
        let dashboard: Dashboard =
            serde_json::from_value(json!({"id": "db1", "entities": {"v3": {}}})).unwrap();
        let mut datasets = DatasetMap::new();
        let mut dataset = Dataset::reference("d1");
        dataset.modified = Some(1_700_000_000_000);
        datasets.insert("d1".to_string(), dataset);

        let list = dashboard_list(&visualisations, &dashboard, &datasets, "");
        let map = &list.entries[1];
        assert_eq!(map.type_label, "Map");
        assert!(map.on_dashboard);
        assert_eq!(list.entries[0].type_label, "Line chart");
        assert!(!list.entries[0].on_dashboard);
        assert_eq!(
            list.entries[0].data_last_updated.as_deref(),
            Some("Nov 14, 2023 22:13")
        );
    }

    #[test]
    fn test_filter_input_threshold() {
        let visualisations: Vec<Visualisation> = (0..6)
            .map(|i| vis(&format!("v{i}"), "Chart", "bar", i))
            .collect();
        let list = dashboard_list(
            &visualisations,
            &Dashboard::default(),
            &DatasetMap::new(),
            "",
        );
        assert!(list.show_filter_input);
        assert!(dashboard_list(&[], &Dashboard::default(), &DatasetMap::new(), "").library_empty);
    }
}
