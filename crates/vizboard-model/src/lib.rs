//! Data model for the Vizboard client.
//!
//! Types mirror the JSON exchanged with the API (camelCase keys) and keep
//! unknown keys so that an edit never silently drops server-side fields.
//!
//! - [`Visualisation`], [`VisualisationType`], [`Status`] - library entities
//! - [`Spec`], [`Layer`], [`SpecField`] - chart configuration
//! - [`Dataset`], [`Column`], [`ColumnType`] - lazily loaded datasets
//! - [`Collection`], [`Dashboard`] - containers referencing entities by id
//! - [`LocaleSelector`], [`SeriesMenu`], select menu helpers - UI state

pub mod collection;
pub mod dataset;
pub mod error;
pub mod locale;
pub mod menu;
pub mod series;
pub mod spec;
pub mod visualisation;

pub use collection::{Collection, Dashboard};
pub use dataset::{Column, ColumnType, Dataset, DatasetMap};
pub use error::{ModelError, Result};
pub use locale::{Locale, LocaleItem, LocaleSelector};
pub use menu::{
    MessageCatalog, ResolvedOption, SelectOption, find_selected, resolve_options,
    resolve_placeholder,
};
pub use series::{SeriesContext, SeriesInput, SeriesMenu};
pub use spec::{Layer, Spec, SpecChange, SpecField};
pub use visualisation::{
    Status, Timestamp, Visualisation, VisualisationDraft, VisualisationType, now_millis,
};
