//! Module providing the typed FluxML document model.
//!
//! Every FluxML element has a record type here. Records are built once during a parse and never
//! mutated afterwards. Field level constraints (ranges, enumerations, minimum lengths) are checked
//! when a record is built, and violations are reported as [`ValidationError`].

pub mod configuration;
pub mod constraints;
pub mod fluxml;
pub mod info;
pub mod integrity;
pub mod measurement;
pub mod network;
pub mod simulation;
pub mod types;

use derive_builder::UninitializedFieldError;
use indexmap::IndexMap;
use thiserror::Error;

/// Enum representing violations of document model constraints
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was never set
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A bounded numeric value is outside its inclusive range
    #[error("`{field}` = {value} is outside the range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A value which must be non-negative was negative (or not a number)
    #[error("`{field}` = {value} must be >= 0")]
    Negative { field: &'static str, value: f64 },
    /// A collection has fewer items than required
    #[error("`{field}` needs at least {min} item(s), found {found}")]
    TooFewItems {
        field: &'static str,
        min: usize,
        found: usize,
    },
    /// An enumerated field got a value outside its closed set
    #[error("`{field}` = {value:?} is not one of {allowed:?}")]
    InvalidVariant {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    /// Two records in a keyed collection share the same key
    #[error("duplicate `{field}` key {key:?}")]
    DuplicateKey { field: &'static str, key: String },
}

impl From<UninitializedFieldError> for ValidationError {
    fn from(err: UninitializedFieldError) -> Self {
        ValidationError::MissingField(err.field_name())
    }
}

/// Check that a collection holds at least `min` items
pub(crate) fn require_min_len<T>(
    field: &'static str,
    items: &[T],
    min: usize,
) -> Result<(), ValidationError> {
    if items.len() < min {
        return Err(ValidationError::TooFewItems {
            field,
            min,
            found: items.len(),
        });
    }
    Ok(())
}

/// Move `items` into an IndexMap keyed by `key`, keeping document order and rejecting duplicates
pub(crate) fn index_unique<T, F>(
    field: &'static str,
    items: Vec<T>,
    key: F,
) -> Result<IndexMap<String, T>, ValidationError>
where
    F: Fn(&T) -> &str,
{
    let mut map = IndexMap::with_capacity(items.len());
    for item in items {
        let id = key(&item).to_string();
        if map.contains_key(&id) {
            return Err(ValidationError::DuplicateKey { field, key: id });
        }
        map.insert(id, item);
    }
    Ok(map)
}
