//! Read access to dataset load state.

use std::collections::{BTreeMap, HashMap, HashSet};

use vizboard_model::Dataset;

/// Answers whether a dataset has been loaded (its columns are known).
pub trait DatasetLookup {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool;

    /// Whether the dataset's rows are at hand. Unknown datasets have none.
    fn dataset_has_rows(&self, dataset_id: &str) -> bool;
}

impl DatasetLookup for HashMap<String, Dataset> {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some_and(Dataset::is_loaded)
    }

    fn dataset_has_rows(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some_and(Dataset::has_rows)
    }
}

impl DatasetLookup for BTreeMap<String, Dataset> {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some_and(Dataset::is_loaded)
    }

    fn dataset_has_rows(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some_and(Dataset::has_rows)
    }
}

/// A plain set of ids that are known to be loaded. It never holds rows.
impl DatasetLookup for HashSet<String> {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool {
        self.contains(dataset_id)
    }

    fn dataset_has_rows(&self, _dataset_id: &str) -> bool {
        false
    }
}

impl<T: DatasetLookup + ?Sized> DatasetLookup for &T {
    fn is_dataset_loaded(&self, dataset_id: &str) -> bool {
        (**self).is_dataset_loaded(dataset_id)
    }

    fn dataset_has_rows(&self, dataset_id: &str) -> bool {
        (**self).dataset_has_rows(dataset_id)
    }
}
