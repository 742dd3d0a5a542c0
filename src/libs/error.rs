//! Error taxonomy for the harvest core.
//!
//! The metrics engine never fails; the registry only checks field presence
//! and identifier existence. Range checks on raw input live in
//! [`crate::libs::validation`] and report through the same enum so callers
//! can match on one type.
//!
//! A lookup that finds nothing (`find_by_id`, filters) is not an error and
//! returns `None` or an empty list instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarvestError {
    /// Raw input is malformed or outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A field required to register a harvest was not supplied.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No harvest record carries the requested identifier.
    #[error("Harvest record #{0} not found")]
    NotFound(u32),
}

impl HarvestError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HarvestError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;
