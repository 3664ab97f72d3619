//! Distinct values of a source column, used to seed text mappings.

use std::collections::HashMap;

use serde_json::Value;
use vizboard_model::Dataset;
use vizboard_validate::DatasetLookup;

use super::mapping::ValueOccurrence;

/// Distinct values of a column with their counts, most frequent first.
///
/// Ties keep the order in which values first appear. Returns `None` when the
/// column is unknown or the rows are not loaded.
#[must_use]
pub fn value_occurrences(dataset: &Dataset, column_name: &str) -> Option<Vec<ValueOccurrence>> {
    let cells = dataset.column_values(column_name)?;
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut occurrences: Vec<ValueOccurrence> = Vec::new();

    for cell in cells {
        let key = cell.to_string();
        match positions.get(&key) {
            Some(&index) => occurrences[index].count += 1,
            None => {
                positions.insert(key, occurrences.len());
                occurrences.push(ValueOccurrence {
                    value: cell.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-appearance order among equal counts
    occurrences.sort_by(|a, b| b.count.cmp(&a.count));
    Some(occurrences)
}

/// Whether the builder has to ask for the dataset rows before it can open.
#[must_use]
pub fn dataset_needs_rows(datasets: &impl DatasetLookup, dataset_id: &str) -> bool {
    !datasets.dataset_has_rows(dataset_id)
}

/// Convenience for callers that only hold raw values.
#[must_use]
pub fn occurrences_of(values: &[Value]) -> Vec<ValueOccurrence> {
    let mut occurrences: Vec<ValueOccurrence> = Vec::new();
    for value in values {
        match occurrences.iter_mut().find(|o| &o.value == value) {
            Some(existing) => existing.count += 1,
            None => occurrences.push(ValueOccurrence::new(value.clone(), 1)),
        }
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "id": "d1",
            "columns": [
                {"columnName": "c1", "title": "Region", "type": "text"}
            ],
            "rows": [["South"], ["North"], ["North"], [null], ["South"], ["East"], ["North"]]
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_sorted_by_frequency() {
        let occurrences = value_occurrences(&dataset(), "c1").expect("column");
        let pairs: Vec<_> = occurrences
            .iter()
            .map(|o| (o.value.clone(), o.count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (json!("North"), 3),
                (json!("South"), 2),
                (Value::Null, 1),
                (json!("East"), 1),
            ]
        );
    }

    #[test]
    fn test_unknown_column() {
        assert!(value_occurrences(&dataset(), "c9").is_none());
    }

    #[test]
    fn test_needs_rows() {
        let mut datasets = HashMap::new();
        assert!(dataset_needs_rows(&datasets, "d1"));
        datasets.insert("d1".to_string(), Dataset::reference("d1"));
        assert!(dataset_needs_rows(&datasets, "d1"));
        datasets.insert("d1".to_string(), dataset());
        assert!(!dataset_needs_rows(&datasets, "d1"));

        let ids = std::collections::HashSet::from(["d1".to_string()]);
        assert!(dataset_needs_rows(&ids, "d1"));
    }

    #[test]
    fn test_occurrences_of_raw_values() {
        let occurrences = occurrences_of(&[json!(1), json!(2), json!(1)]);
        assert_eq!(
            occurrences,
            vec![ValueOccurrence::new(1, 2), ValueOccurrence::new(2, 1)]
        );
    }
}
