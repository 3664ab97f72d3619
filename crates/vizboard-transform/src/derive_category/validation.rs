//! Category name checks run after every mapping edit.

use std::collections::HashMap;

use serde::Serialize;

/// Problems with the target category names of a mapping set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryValidation {
    /// Names used by more than one rule (the fallback counts as a rule),
    /// in order of first appearance.
    pub duplicated_category_names: Vec<String>,
    /// Some rule, or the fallback, has no category name.
    pub empty_categories: bool,
}

impl CategoryValidation {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicated_category_names.is_empty() && !self.empty_categories
    }
}

/// Count category names across the rules plus the fallback label.
///
/// Blank or missing names set `empty_categories` and are not reported as
/// duplicates.
pub fn validate_categories<'a, I>(categories: I, fallback: Option<&'a str>) -> CategoryValidation
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut empty_categories = false;

    for name in categories.into_iter().chain(std::iter::once(fallback)) {
        match name {
            Some(name) if !name.is_empty() => {
                let count = counts.entry(name).or_insert(0);
                if *count == 0 {
                    order.push(name);
                }
                *count += 1;
            }
            _ => empty_categories = true,
        }
    }

    let duplicated_category_names = order
        .into_iter()
        .filter(|name| counts.get(name).copied().unwrap_or(0) > 1)
        .map(str::to_string)
        .collect();

    CategoryValidation {
        duplicated_category_names,
        empty_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_reported_once() {
        let result = validate_categories([Some("X"), Some("X"), Some("Y")], Some("Other"));
        assert_eq!(result.duplicated_category_names, vec!["X"]);
        assert!(!result.empty_categories);
    }

    #[test]
    fn test_fallback_counts_as_occurrence() {
        let result = validate_categories([Some("Other"), Some("Y")], Some("Other"));
        assert_eq!(result.duplicated_category_names, vec!["Other"]);
    }

    #[test]
    fn test_empty_names() {
        let result = validate_categories([Some(""), Some("Y")], Some("Other"));
        assert!(result.empty_categories);
        assert!(result.duplicated_category_names.is_empty());

        let result = validate_categories([None, Some("Y")], Some("Other"));
        assert!(result.empty_categories);

        let result = validate_categories([Some("Y")], None);
        assert!(result.empty_categories);
    }

    #[test]
    fn test_clean() {
        assert!(validate_categories([Some("A"), Some("B")], Some("Other")).is_clean());
    }
}
