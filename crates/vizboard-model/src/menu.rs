//! Select menu option handling.
//!
//! Message catalogs live outside the client core; menus only need a way to
//! look a message up by id, which [`MessageCatalog`] provides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Message id of the generic "Select" prompt.
pub const SELECT_MESSAGE_ID: &str = "select";

/// Lookup of translated messages by id.
pub trait MessageCatalog {
    /// Translated message, or `None` if the catalog has no entry.
    fn message(&self, id: &str) -> Option<String>;

    /// Translated message, falling back to the id itself.
    fn format_message(&self, id: &str) -> String {
        self.message(id).unwrap_or_else(|| id.to_string())
    }
}

impl MessageCatalog for HashMap<String, String> {
    fn message(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// A menu option before translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Message id; takes precedence over `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,

    /// Nested options (option groups).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
            ..Self::default()
        }
    }
}

/// A menu option ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub value: String,
    pub label: String,
    pub options: Vec<SelectOption>,
}

/// Placeholder text: translated id, explicit text, or the generic prompt.
pub fn resolve_placeholder(
    catalog: &impl MessageCatalog,
    placeholder_id: Option<&str>,
    placeholder: Option<&str>,
) -> String {
    match (placeholder_id, placeholder) {
        (Some(id), _) => catalog.format_message(id),
        (None, Some(text)) => text.to_string(),
        (None, None) => format!("{}...", catalog.format_message(SELECT_MESSAGE_ID)),
    }
}

/// Translate option labels.
pub fn resolve_options(
    catalog: &impl MessageCatalog,
    options: &[SelectOption],
) -> Vec<ResolvedOption> {
    options
        .iter()
        .map(|option| ResolvedOption {
            value: option.value.clone(),
            label: match &option.label_id {
                Some(id) => catalog.format_message(id),
                None => option.label.clone().unwrap_or_default(),
            },
            options: option.options.clone(),
        })
        .collect()
}

/// Option matching a selected value.
#[must_use]
pub fn find_selected<'a>(options: &'a [ResolvedOption], value: &str) -> Option<&'a ResolvedOption> {
    options.iter().find(|option| option.value == value)
}
