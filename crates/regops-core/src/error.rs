//! Structured error hierarchy for the core types.
//!
//! Two small families: [`ValidationError`] for domain-primitive and field
//! validation, [`PatchError`] for shallow-merge patch application. Higher
//! layers (client, store) define their own error enums and convert from
//! these where they surface.

use thiserror::Error;

/// Errors from validating domain primitives and client-settable fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tenant identifier failed format validation.
    #[error("invalid tenant id: {0:?}")]
    InvalidTenantId(String),

    /// A required text field was empty after trimming.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// A numeric field fell outside its allowed range.
    #[error("field `{field}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

/// Errors from applying a shallow-merge patch to a typed record.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The patch document was not a JSON object.
    #[error("patch must be a JSON object")]
    NotAnObject,

    /// The patch attempted to change the record's id.
    #[error("patch may not change the record id")]
    IdImmutable,

    /// The merged document no longer deserializes as the record type.
    #[error("patched record failed to round-trip: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::InvalidTenantId("Bad Tenant!".to_string());
        assert_eq!(err.to_string(), "invalid tenant id: \"Bad Tenant!\"");

        let err = ValidationError::EmptyField("title");
        assert_eq!(err.to_string(), "field `title` must not be empty");

        let err = ValidationError::OutOfRange {
            field: "likelihood",
            value: 9,
            min: 1,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "field `likelihood` must be between 1 and 5, got 9"
        );
    }

    #[test]
    fn patch_error_display() {
        assert_eq!(
            PatchError::NotAnObject.to_string(),
            "patch must be a JSON object"
        );
        assert_eq!(
            PatchError::IdImmutable.to_string(),
            "patch may not change the record id"
        );
    }

    #[test]
    fn patch_error_wraps_serde() {
        let serde_err = serde_json::from_str::<u32>("\"not a number\"").unwrap_err();
        let err = PatchError::from(serde_err);
        assert!(err.to_string().starts_with("patched record failed to round-trip:"));
    }
}
