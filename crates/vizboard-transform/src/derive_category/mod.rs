//! Derive-category: map the values of one column into a new categorical column.

mod mapping;
mod session;
mod validation;
mod values;

pub use mapping::{
    Comparison, MappingKind, Mappings, NumberCondition, NumberMapping, TextMapping,
    ValueOccurrence,
};
pub use session::{
    DERIVE_CATEGORY_OP, DeriveCategorySession, Notification, NotificationLevel, Stage,
    SubmitOutcome,
};
pub use validation::{CategoryValidation, validate_categories};
pub use values::{dataset_needs_rows, occurrences_of, value_occurrences};
