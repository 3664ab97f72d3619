//! The derive-category builder session.
//!
//! A session moves through three stages:
//!
//! ```text
//! ChoosingSourceColumn --select--> BuildingMappings --submit--> Submitted
//!          ^                              |
//!          +---------- reselect ----------+
//! ```
//!
//! Category validation is recomputed synchronously on every edit, so
//! [`DeriveCategorySession::validation`] always reflects the current rules.

use serde::Serialize;
use serde_json::{Map, Value, json};
use vizboard_model::Column;

use super::mapping::{MappingKind, Mappings, NumberMapping, TextMapping};
use super::validation::{CategoryValidation, validate_categories};
use crate::descriptor::TransformationDescriptor;
use crate::error::{Result, TransformError};

/// Operation name of the derive-category transformation.
pub const DERIVE_CATEGORY_OP: &str = "core/derive-category";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Waiting for a source column. Holds the column chosen before, if the
    /// user went back to pick again.
    ChoosingSourceColumn { previous: Option<Column> },
    /// Source column chosen; rules are being edited.
    BuildingMappings { source: Column },
    /// Sent off; the descriptor is final.
    Submitted {
        descriptor: TransformationDescriptor,
    },
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Self::ChoosingSourceColumn { .. } => "choosing a source column",
            Self::BuildingMappings { .. } => "building mappings",
            Self::Submitted { .. } => "submitted",
        }
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// Message shown to the user instead of raising an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Result of [`DeriveCategorySession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Descriptor ready to apply.
    Submitted(TransformationDescriptor),
    /// Refused; the session is unchanged so the user can fix the rules.
    Refused(Notification),
}

/// Builder state for one derive-category transformation.
#[derive(Debug, Clone)]
pub struct DeriveCategorySession {
    dataset_id: String,
    stage: Stage,
    target_title: String,
    fallback: Option<String>,
    mappings: Option<Mappings>,
    validation: CategoryValidation,
}

impl DeriveCategorySession {
    /// Start a session on a dataset. The fallback label defaults to `Uncategorized`.
    pub fn new(dataset_id: impl Into<String>) -> Self {
        let mut session = Self {
            dataset_id: dataset_id.into(),
            stage: Stage::ChoosingSourceColumn { previous: None },
            target_title: String::new(),
            fallback: Some("Uncategorized".to_string()),
            mappings: None,
            validation: CategoryValidation::default(),
        };
        session.revalidate();
        session
    }

    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The chosen source column, also while the user is picking another one.
    #[must_use]
    pub fn source_column(&self) -> Option<&Column> {
        match &self.stage {
            Stage::ChoosingSourceColumn { previous } => previous.as_ref(),
            Stage::BuildingMappings { source } => Some(source),
            Stage::Submitted { .. } => None,
        }
    }

    #[must_use]
    pub fn mappings(&self) -> Option<&Mappings> {
        self.mappings.as_ref()
    }

    #[must_use]
    pub fn target_title(&self) -> &str {
        &self.target_title
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    #[must_use]
    pub fn validation(&self) -> &CategoryValidation {
        &self.validation
    }

    /// Confirm the source column and move on to editing rules.
    ///
    /// Choosing a different column than before clears the rules, since they
    /// refer to the old column's values. Confirming the same column keeps them.
    pub fn select_source_column(&mut self, column: Column) -> Result<()> {
        let previous = match &mut self.stage {
            Stage::ChoosingSourceColumn { previous } => previous.take(),
            other => {
                return Err(TransformError::InvalidStage {
                    operation: "select a source column",
                    stage: other.name(),
                });
            }
        };
        let kind = match MappingKind::for_column_type(&column.column_type) {
            Ok(kind) => kind,
            Err(err) => {
                self.stage = Stage::ChoosingSourceColumn { previous };
                return Err(err);
            }
        };

        let same_column = previous
            .as_ref()
            .is_some_and(|prev| prev.column_name == column.column_name);
        if !same_column || self.mappings.is_none() {
            tracing::debug!(column = %column.column_name, %kind, "source column changed, resetting mappings");
            self.mappings = Some(Mappings::empty(kind));
        }
        self.stage = Stage::BuildingMappings { source: column };
        self.revalidate();
        Ok(())
    }

    /// Go back to choosing the source column, keeping the current one in mind.
    pub fn reselect_source_column(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.stage, Stage::ChoosingSourceColumn { previous: None }) {
            Stage::BuildingMappings { source } => {
                self.stage = Stage::ChoosingSourceColumn {
                    previous: Some(source),
                };
                Ok(())
            }
            other => {
                let stage = other.name();
                self.stage = other;
                Err(TransformError::InvalidStage {
                    operation: "reselect the source column",
                    stage,
                })
            }
        }
    }

    /// Replace the whole rule list.
    pub fn set_mappings(&mut self, mappings: Mappings) -> Result<()> {
        let current = self.editable_mappings("edit mappings")?;
        if current.kind() != mappings.kind() {
            return Err(TransformError::MappingKindMismatch {
                expected: current.kind(),
                found: mappings.kind(),
            });
        }
        *current = mappings;
        self.revalidate();
        Ok(())
    }

    pub fn add_text_mapping(&mut self, mapping: TextMapping) -> Result<()> {
        match self.editable_mappings("add a mapping")? {
            Mappings::Text(rules) => rules.push(mapping),
            Mappings::Number(_) => {
                return Err(TransformError::MappingKindMismatch {
                    expected: MappingKind::Number,
                    found: MappingKind::Text,
                });
            }
        }
        self.revalidate();
        Ok(())
    }

    pub fn add_number_mapping(&mut self, mapping: NumberMapping) -> Result<()> {
        match self.editable_mappings("add a mapping")? {
            Mappings::Number(rules) => rules.push(mapping),
            Mappings::Text(_) => {
                return Err(TransformError::MappingKindMismatch {
                    expected: MappingKind::Text,
                    found: MappingKind::Number,
                });
            }
        }
        self.revalidate();
        Ok(())
    }

    /// Rename the target category of one rule.
    pub fn set_category(&mut self, index: usize, category: Option<String>) -> Result<()> {
        self.editable_mappings("rename a category")?
            .set_category(index, category)?;
        self.revalidate();
        Ok(())
    }

    pub fn set_target_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.ensure_not_submitted("set the target column title")?;
        self.target_title = title.into();
        Ok(())
    }

    /// Set the label given to values no rule matches.
    pub fn set_fallback(&mut self, label: Option<String>) -> Result<()> {
        self.ensure_not_submitted("set the fallback category")?;
        self.fallback = label;
        self.revalidate();
        Ok(())
    }

    /// Whether every required input is present.
    #[must_use]
    pub fn is_valid_transformation(&self) -> bool {
        self.incomplete_reason().is_none()
    }

    /// Whether the apply button is enabled.
    #[must_use]
    pub fn can_apply(&self, transforming: bool) -> bool {
        !transforming && self.is_valid_transformation()
    }

    /// Build the descriptor, or refuse with a notification if category names clash.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let source = match &self.stage {
            Stage::BuildingMappings { source } => source.clone(),
            other => {
                return Err(TransformError::InvalidStage {
                    operation: "submit",
                    stage: other.name(),
                });
            }
        };
        if let Some(reason) = self.incomplete_reason() {
            return Err(TransformError::Incomplete(reason));
        }
        if let Some(notification) = self.refusal() {
            tracing::info!(message = %notification.message, "derive-category submission refused");
            return Ok(SubmitOutcome::Refused(notification));
        }

        let descriptor = self.build_descriptor(&source)?;
        self.stage = Stage::Submitted {
            descriptor: descriptor.clone(),
        };
        Ok(SubmitOutcome::Submitted(descriptor))
    }

    fn build_descriptor(&self, source: &Column) -> Result<TransformationDescriptor> {
        let mappings = self
            .mappings
            .as_ref()
            .ok_or(TransformError::Incomplete("no mappings"))?;

        let serialized = match mappings {
            Mappings::Text(rules) => Value::Array(
                rules
                    .iter()
                    .map(|rule| json!([rule.raw_values(), rule.category]))
                    .collect(),
            ),
            Mappings::Number(rules) => serde_json::to_value(rules)?,
        };

        let mut args = Map::new();
        args.insert(
            "source".to_string(),
            json!({ "column": serde_json::to_value(source)? }),
        );
        args.insert(
            "target".to_string(),
            json!({ "column": { "title": self.target_title } }),
        );
        args.insert(
            "derivation".to_string(),
            json!({
                "type": source.column_type.as_str(),
                "mappings": serialized,
                "uncategorizedValue": self.fallback,
            }),
        );

        Ok(TransformationDescriptor {
            op: DERIVE_CATEGORY_OP.to_string(),
            args,
        })
    }

    fn refusal(&self) -> Option<Notification> {
        if !self.validation.duplicated_category_names.is_empty() {
            return Some(Notification {
                level: NotificationLevel::Warning,
                message: format!(
                    "Category names must be unique. Duplicated: {}",
                    self.validation.duplicated_category_names.join(", ")
                ),
            });
        }
        if self.validation.empty_categories {
            return Some(Notification {
                level: NotificationLevel::Warning,
                message: "Category names cannot be empty".to_string(),
            });
        }
        None
    }

    fn incomplete_reason(&self) -> Option<&'static str> {
        let Stage::BuildingMappings { source } = &self.stage else {
            return Some("no source column selected");
        };
        if source.display_title().is_none() {
            return Some("source column has no title");
        }
        if self.target_title.trim().is_empty() {
            return Some("target column has no title");
        }
        if self.mappings.as_ref().is_none_or(Mappings::is_empty) {
            return Some("no mappings");
        }
        None
    }

    fn editable_mappings(&mut self, operation: &'static str) -> Result<&mut Mappings> {
        match (&self.stage, self.mappings.as_mut()) {
            (Stage::BuildingMappings { .. }, Some(mappings)) => Ok(mappings),
            (stage, _) => Err(TransformError::InvalidStage {
                operation,
                stage: stage.name(),
            }),
        }
    }

    fn ensure_not_submitted(&self, operation: &'static str) -> Result<()> {
        if let Stage::Submitted { .. } = self.stage {
            return Err(TransformError::InvalidStage {
                operation,
                stage: self.stage.name(),
            });
        }
        Ok(())
    }

    fn revalidate(&mut self) {
        let categories = self
            .mappings
            .as_ref()
            .map(Mappings::categories)
            .unwrap_or_default();
        self.validation = validate_categories(categories, self.fallback.as_deref());
    }
}
