//! Series menu: editing the list of Y metric columns of a chart.

use crate::error::{ModelError, Result};
use crate::menu::SelectOption;
use crate::spec::SpecChange;

/// Whether the "add series" input is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesInput {
    #[default]
    Idle,
    Adding,
}

/// What the menu needs to know about the chart being edited.
#[derive(Debug, Clone, Copy)]
pub struct SeriesContext<'a> {
    pub metric_columns_y: &'a [String],
    /// Aggregation label used as the Y axis label while series exist.
    pub metric_aggregation: &'a str,
    /// Title of the primary Y column, used once every series is removed.
    pub metric_column_y_title: Option<&'a str>,
}

/// State of the series menu.
#[derive(Debug, Clone, Default)]
pub struct SeriesMenu {
    input: SeriesInput,
}

impl SeriesMenu {
    #[must_use]
    pub fn input(&self) -> SeriesInput {
        self.input
    }

    pub fn toggle_input(&mut self) {
        self.input = match self.input {
            SeriesInput::Idle => SeriesInput::Adding,
            SeriesInput::Adding => SeriesInput::Idle,
        };
    }

    /// Handle a change of one of the series selects.
    ///
    /// - a value for an existing index replaces that series
    /// - a value without index appends a new series and closes the input
    /// - clearing an existing index removes that series
    /// - clearing the new-series input just closes it
    pub fn update_series(
        &mut self,
        context: SeriesContext<'_>,
        value: Option<&str>,
        index: Option<usize>,
    ) -> Result<Option<SpecChange>> {
        let change = match (value, index) {
            (Some(column), Some(index)) => {
                let mut columns = context.metric_columns_y.to_vec();
                let len = columns.len();
                let slot = columns
                    .get_mut(index)
                    .ok_or(ModelError::SeriesIndexOutOfRange { index, len })?;
                *slot = column.to_string();
                Some(aggregated_change(context, columns))
            }
            (Some(column), None) => {
                let mut columns = context.metric_columns_y.to_vec();
                columns.push(column.to_string());
                Some(aggregated_change(context, columns))
            }
            (None, Some(index)) => Some(remove_series(context, index)?),
            (None, None) => None,
        };
        if value.is_some() || index.is_none() {
            self.input = SeriesInput::Idle;
        }
        Ok(change)
    }

    /// Options for one select: columns not used by another series.
    #[must_use]
    pub fn column_options(
        options: &[SelectOption],
        metric_columns_y: &[String],
        own_value: Option<&str>,
    ) -> Vec<SelectOption> {
        options
            .iter()
            .filter(|option| {
                !metric_columns_y.contains(&option.value) || own_value == Some(option.value.as_str())
            })
            .cloned()
            .collect()
    }
}

fn aggregated_change(context: SeriesContext<'_>, columns: Vec<String>) -> SpecChange {
    SpecChange {
        metric_columns_y: columns,
        axis_label_y: Some(context.metric_aggregation.to_string()),
        axis_label_y_from_user: false,
    }
}

fn remove_series(context: SeriesContext<'_>, index: usize) -> Result<SpecChange> {
    let mut columns = context.metric_columns_y.to_vec();
    if index >= columns.len() {
        return Err(ModelError::SeriesIndexOutOfRange {
            index,
            len: columns.len(),
        });
    }
    columns.remove(index);
    if columns.is_empty() {
        Ok(SpecChange {
            metric_columns_y: columns,
            axis_label_y: context.metric_column_y_title.map(str::to_string),
            axis_label_y_from_user: false,
        })
    } else {
        Ok(aggregated_change(context, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn context(series: &[String]) -> SeriesContext<'_> {
        SeriesContext {
            metric_columns_y: series,
            metric_aggregation: "Sum",
            metric_column_y_title: Some("Revenue"),
        }
    }

    #[test]
    fn test_add_series_closes_input() {
        let series = columns(&["c1"]);
        let mut menu = SeriesMenu::default();
        menu.toggle_input();
        assert_eq!(menu.input(), SeriesInput::Adding);

        let change = menu
            .update_series(context(&series), Some("c2"), None)
            .unwrap()
            .expect("change");
        assert_eq!(change.metric_columns_y, columns(&["c1", "c2"]));
        assert_eq!(change.axis_label_y.as_deref(), Some("Sum"));
        assert!(!change.axis_label_y_from_user);
        assert_eq!(menu.input(), SeriesInput::Idle);
    }

    #[test]
    fn test_change_series_in_place() {
        let series = columns(&["c1", "c2"]);
        let mut menu = SeriesMenu::default();
        let change = menu
            .update_series(context(&series), Some("c3"), Some(1))
            .unwrap()
            .expect("change");
        assert_eq!(change.metric_columns_y, columns(&["c1", "c3"]));
    }

    #[test]
    fn test_remove_last_series_uses_column_title() {
        let series = columns(&["c1"]);
        let mut menu = SeriesMenu::default();
        let change = menu
            .update_series(context(&series), None, Some(0))
            .unwrap()
            .expect("change");
        assert!(change.metric_columns_y.is_empty());
        assert_eq!(change.axis_label_y.as_deref(), Some("Revenue"));
    }

    #[test]
    fn test_remove_one_of_many_keeps_aggregation_label() {
        let series = columns(&["c1", "c2"]);
        let mut menu = SeriesMenu::default();
        let change = menu
            .update_series(context(&series), None, Some(0))
            .unwrap()
            .expect("change");
        assert_eq!(change.metric_columns_y, columns(&["c2"]));
        assert_eq!(change.axis_label_y.as_deref(), Some("Sum"));
    }

    #[test]
    fn test_remove_out_of_range() {
        let series = columns(&["c1"]);
        let mut menu = SeriesMenu::default();
        let err = menu
            .update_series(context(&series), None, Some(3))
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::SeriesIndexOutOfRange { index: 3, len: 1 }
        ));
    }

    #[test]
    fn test_clearing_new_series_input_is_noop() {
        let series = columns(&["c1"]);
        let mut menu = SeriesMenu::default();
        menu.toggle_input();
        let change = menu.update_series(context(&series), None, None).unwrap();
        assert!(change.is_none());
        assert_eq!(menu.input(), SeriesInput::Idle);
    }

    #[test]
    fn test_column_options_exclude_used() {
        let options = vec![
            SelectOption::new("c1", "A"),
            SelectOption::new("c2", "B"),
            SelectOption::new("c3", "C"),
        ];
        let used = columns(&["c1", "c2"]);
        let values: Vec<_> = SeriesMenu::column_options(&options, &used, Some("c2"))
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["c2", "c3"]);

        let values: Vec<_> = SeriesMenu::column_options(&options, &used, None)
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["c3"]);
    }
}
