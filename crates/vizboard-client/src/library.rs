//! Client-side library state: everything the controller has loaded.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use vizboard_model::{Collection, Dashboard, Dataset, DatasetMap, Visualisation};
use vizboard_validate::DatasetLookup;

/// Loaded entities, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub visualisations: BTreeMap<String, Visualisation>,
    pub datasets: DatasetMap,
    pub collections: BTreeMap<String, Collection>,
    pub dashboards: BTreeMap<String, Dashboard>,
    /// Share id per visualisation id.
    pub shares: HashMap<String, String>,
    /// Visualisations with a fetch that completed.
    pub loaded: BTreeSet<String>,
    /// Visualisations with a delete request sent.
    pub deleting: BTreeSet<String>,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visualisation(&self, id: &str) -> Option<&Visualisation> {
        self.visualisations.get(id)
    }

    pub fn put_visualisation(&mut self, visualisation: Visualisation) {
        self.visualisations
            .insert(visualisation.id.clone(), visualisation);
    }

    /// Store a dataset, keeping already loaded columns and rows when the
    /// incoming copy lacks them.
    pub fn put_dataset(&mut self, dataset: Dataset) {
        match self.datasets.get_mut(&dataset.id) {
            Some(existing) => {
                let columns = dataset.columns.or_else(|| existing.columns.take());
                let rows = dataset.rows.or_else(|| existing.rows.take());
                *existing = Dataset {
                    columns,
                    rows,
                    ..dataset
                };
            }
            None => {
                self.datasets.insert(dataset.id.clone(), dataset);
            }
        }
    }

    pub fn put_dashboard(&mut self, dashboard: Dashboard) {
        self.dashboards.insert(dashboard.id.clone(), dashboard);
    }

    pub fn put_collection(&mut self, collection: Collection) {
        self.collections.insert(collection.id.clone(), collection);
    }

    /// Drop a visualisation and every dashboard placement of it.
    pub fn remove_visualisation(&mut self, id: &str) -> Option<Visualisation> {
        for dashboard in self.dashboards.values_mut() {
            dashboard.remove_entity(id);
        }
        self.loaded.remove(id);
        self.shares.remove(id);
        self.deleting.remove(id);
        self.visualisations.remove(id)
    }

    #[must_use]
    pub fn share_id(&self, visualisation_id: &str) -> Option<&str> {
        self.shares.get(visualisation_id).map(String::as_str)
    }

    #[must_use]
    pub fn is_loaded(&self, visualisation_id: &str) -> bool {
        self.loaded.contains(visualisation_id)
    }

    #[must_use]
    pub fn is_deleting(&self, visualisation_id: &str) -> bool {
        self.deleting.contains(visualisation_id)
    }
}

impl DatasetLookup for Library {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool {
        self.datasets.is_dataset_loaded(dataset_id)
    }

    fn dataset_has_rows(&self, dataset_id: &str) -> bool {
        self.datasets.dataset_has_rows(dataset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard(entities: &[&str]) -> Dashboard {
        Dashboard {
            id: "db1".to_string(),
            entities: entities
                .iter()
                .map(|id| ((*id).to_string(), json!({"type": "visualisation"})))
                .collect(),
            ..Dashboard::default()
        }
    }

    #[test]
    fn test_remove_clears_dashboard_placements() {
        let mut library = Library::new();
        library.put_dashboard(dashboard(&["v1", "v2"]));
        library.deleting.insert("v1".to_string());

        library.remove_visualisation("v1");

        let db = &library.dashboards["db1"];
        assert!(!db.contains("v1"));
        assert!(db.contains("v2"));
        assert!(!library.is_deleting("v1"));
    }

    #[test]
    fn test_put_dataset_keeps_loaded_columns() {
        let mut library = Library::new();
        let full: Dataset = serde_json::from_value(json!({
            "id": "d1",
            "name": "Sales",
            "columns": [{"columnName": "c1", "type": "number"}],
        }))
        .unwrap();
        library.put_dataset(full);
        assert!(library.is_dataset_loaded("d1"));

        let mut renamed = Dataset::reference("d1");
        renamed.name = Some("Sales 2024".to_string());
        library.put_dataset(renamed);

        assert!(library.is_dataset_loaded("d1"));
        assert_eq!(library.datasets["d1"].name.as_deref(), Some("Sales 2024"));
    }
}
