//! Collections and dashboards: containers that reference library entities by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user-curated group of library entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub entities: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Append entity ids that are not members yet. Returns whether anything changed.
    pub fn add_entities<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.entities.len();
        for id in ids {
            let id = id.into();
            if !self.entities.contains(&id) {
                self.entities.push(id);
            }
        }
        self.entities.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.iter().any(|entity| entity == id)
    }
}

/// A dashboard. Placements are keyed by the id of the placed entity; their
/// layout payload is opaque to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub entities: BTreeMap<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dashboard {
    #[must_use]
    pub fn contains(&self, entity_id: &str) -> bool {
        self.entities.contains_key(entity_id)
    }

    /// Remove the placement of an entity. Returns whether it was placed.
    pub fn remove_entity(&mut self, entity_id: &str) -> bool {
        self.entities.remove(entity_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_entities_skips_members() {
        let mut collection = Collection {
            id: "c1".to_string(),
            entities: vec!["v1".to_string()],
            ..Collection::default()
        };
        assert!(collection.add_entities(["v1", "v2", "v2"]));
        assert_eq!(collection.entities, vec!["v1", "v2"]);
        assert!(!collection.add_entities(["v2"]));
    }

    #[test]
    fn test_dashboard_remove() {
        let mut dashboard: Dashboard = serde_json::from_str(
            r#"{"id":"db1","title":"Ops","entities":{"v1":{"type":"visualisation"}},"layout":[]}"#,
        )
        .unwrap();
        assert!(dashboard.contains("v1"));
        assert!(dashboard.remove_entity("v1"));
        assert!(!dashboard.remove_entity("v1"));
        assert!(dashboard.extra.contains_key("layout"));
    }
}
