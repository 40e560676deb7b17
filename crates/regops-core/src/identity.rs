//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the RegOps stack.
//! Each identifier is a distinct type — you cannot pass a [`TenantId`]
//! where a [`RecordId`] is expected.
//!
//! ## Validation
//!
//! [`RecordId`] is UUID-based and always valid by construction. [`TenantId`]
//! is string-based and validates its slug format at construction time,
//! including at deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A unique identifier for one domain record within a tenant.
///
/// Backends are free to issue numeric or string ids; this stack standardizes
/// on UUIDs, carried as their canonical string form on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random record identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a record identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// An isolated customer account. All records are scoped to one tenant;
/// the scope travels inside the bearer token and the server stamps it onto
/// every record it returns.
///
/// # Validation
///
/// - Non-empty after trimming, at most 64 characters
/// - Lowercase ASCII alphanumerics and `-` only
/// - Must not begin or end with `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TenantId(String);

impl_validating_deserialize!(TenantId);

impl TenantId {
    /// Create a tenant id from a string, validating the slug format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTenantId`] if the string does not
    /// match the slug format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.len() > 64 {
            return Err(ValidationError::InvalidTenantId(s));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::InvalidTenantId(s));
        }
        if trimmed.starts_with('-') || trimmed.ends_with('-') {
            return Err(ValidationError::InvalidTenantId(s));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Access the tenant slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
