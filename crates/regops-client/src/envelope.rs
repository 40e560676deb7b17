//! The uniform response envelope every endpoint answers with.
//!
//! `{ "success": bool, "data": ..., "error": ... }` — list endpoints carry
//! an array in `data`, record endpoints an object, and the delete family
//! may answer with a bare `{ "success": true }`. Extraction helpers turn
//! each of those shapes into the right `Result`.

use serde::Deserialize;

use crate::error::ApiError;

/// A decoded response envelope, before the success flag is inspected.
///
/// `data` and `error` are plain `Option` fields: a missing key decodes as
/// `None` without requiring `T: Default`, so payload types stay free of
/// that bound.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Require success and a data payload.
    pub fn into_data(self, endpoint: &str) -> Result<T, ApiError> {
        self.into_optional_data(endpoint)?
            .ok_or_else(|| ApiError::MissingData {
                endpoint: endpoint.to_string(),
            })
    }

    /// Require success; the payload may legitimately be absent.
    pub fn into_optional_data(self, endpoint: &str) -> Result<Option<T>, ApiError> {
        if !self.success {
            return Err(ApiError::Application {
                endpoint: endpoint.to_string(),
                message: self
                    .error
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }
        Ok(self.data)
    }

    /// Require success, discarding any payload.
    pub fn ensure_success(self, endpoint: &str) -> Result<(), ApiError> {
        self.into_optional_data(endpoint).map(|_| ())
    }
}
