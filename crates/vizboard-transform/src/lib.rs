//! Transformation builders.
//!
//! A builder accumulates user edits into a [`TransformationDescriptor`]
//! (operation name plus argument tree) and refuses to submit it until the
//! edits form a valid transformation.
//!
//! - [`descriptor`] - descriptors and generic pending edits
//! - [`derive_category`] - the derive-category session and its validation

pub mod derive_category;
pub mod descriptor;
pub mod error;

pub use derive_category::{
    CategoryValidation, DERIVE_CATEGORY_OP, DeriveCategorySession, MappingKind, Mappings,
    Notification, NotificationLevel, NumberMapping, Stage, SubmitOutcome, TextMapping,
    validate_categories, value_occurrences,
};
pub use descriptor::{PendingTransformation, TransformationDescriptor};
pub use error::{Result, TransformError};
