//! Datasets a visualisation depends on.

use std::collections::BTreeSet;

use vizboard_model::Visualisation;

use crate::lookup::DatasetLookup;

/// Ids of every dataset that must be loaded before the visualisation renders.
///
/// The primary dataset comes first; maps add each layer's dataset and
/// aggregation dataset. Duplicates collapse.
#[must_use]
pub fn resolve_dataset_ids(visualisation: &Visualisation) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    if let Some(id) = &visualisation.dataset_id {
        ids.insert(id.clone());
    }
    if visualisation.visualisation_type.is_map() {
        for layer in &visualisation.spec.layers {
            ids.extend(layer.dataset_id.iter().cloned());
            ids.extend(layer.aggregation_dataset.iter().cloned());
        }
    }
    tracing::trace!(
        visualisation = %visualisation.id,
        count = ids.len(),
        "resolved dataset dependencies"
    );
    ids
}

/// Dependencies that are not loaded yet.
pub fn missing_dataset_ids(
    visualisation: &Visualisation,
    datasets: &impl DatasetLookup,
) -> BTreeSet<String> {
    resolve_dataset_ids(visualisation)
        .into_iter()
        .filter(|id| !datasets.is_dataset_loaded(id))
        .collect()
}
