//! Vizboard API client.
//!
//! This crate provides:
//! - [`HttpApi`], a `reqwest` client for the Vizboard REST API
//! - [`LifecycleController`], which creates, fetches, saves, deletes,
//!   exports and shares visualisations against any [`VisualisationApi`]
//! - [`Library`], the client-side store the controller fills
//! - [`ClientSettings`], persisted in the user's config directory
//! - [`dashboard_list`], the visualisation picker of the dashboard editor

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod library;
pub mod lifecycle;
pub mod listing;

pub use api::{ExportedFile, HttpApi, Share, ShareRequest, VisualisationApi};
pub use config::ClientSettings;
pub use error::{ClientError, Result};
pub use event::{EventSink, LibraryEvent, Opener, Operation, SystemOpener, TracingSink};
pub use library::Library;
pub use lifecycle::{FetchMode, LifecycleController};
pub use listing::{DashboardList, ListEntry, dashboard_list};
