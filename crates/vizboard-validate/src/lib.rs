//! Pure checks run before a visualisation is rendered or persisted.
//!
//! - [`render_readiness`] / [`is_renderable`]: per-type spec and dataset rules
//! - [`spec_is_valid_for_api`]: whether a spec may be saved or listed
//! - [`resolve_dataset_ids`]: datasets to load for a visualisation
//! - [`should_mount_viewer`] / [`viewer_frame`]: the preview gate

pub mod dependencies;
pub mod lookup;
pub mod preview;
pub mod render;

pub use dependencies::{missing_dataset_ids, resolve_dataset_ids};
pub use lookup::DatasetLookup;
pub use preview::{ViewerFrame, should_mount_viewer, viewer_frame};
pub use render::{
    Readiness, Requirement, is_renderable, render_readiness, requirement, spec_is_valid_for_api,
};
