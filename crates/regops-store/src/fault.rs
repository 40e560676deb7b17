//! The store-level failure record.
//!
//! Every store operation that fails leaves a [`StoreFault`] in the store's
//! `last_error` slot and returns the same fault to the caller. Unlike a bare
//! string, the fault keeps the failure class machine-readable so a UI can
//! distinguish "the network is down" from "the server refused the request".

use regops_core::PatchError;

use regops_client::ApiError;

/// Classification of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The request never produced an HTTP response.
    Transport,
    /// The server answered with a non-success HTTP status.
    Status,
    /// The server answered 2xx but reported `success: false`.
    Application,
    /// The response (or a local patch merge) could not be decoded.
    Decode,
    /// The local snapshot file could not be written or read.
    Snapshot,
}

impl FaultKind {
    /// Short lowercase label, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Application => "application",
            Self::Decode => "decode",
            Self::Snapshot => "snapshot",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cloneable snapshot of the last failure a store observed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} fault: {message}")]
pub struct StoreFault {
    /// Failure class.
    pub kind: FaultKind,
    /// Human-readable description, including the endpoint that failed.
    pub message: String,
}

impl StoreFault {
    /// Build a fault from its parts.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ApiError> for StoreFault {
    fn from(err: &ApiError) -> Self {
        let kind = match err {
            ApiError::Http { .. } => FaultKind::Transport,
            ApiError::Status { .. } => FaultKind::Status,
            ApiError::Application { .. } => FaultKind::Application,
            ApiError::Decode { .. } | ApiError::MissingData { .. } => FaultKind::Decode,
            // Configuration problems surface before any request leaves the
            // process; classify as transport if one ever reaches a store.
            ApiError::Config(_) => FaultKind::Transport,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<PatchError> for StoreFault {
    fn from(err: PatchError) -> Self {
        Self::new(FaultKind::Decode, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_to_matching_kind() {
        let err = ApiError::Status {
            endpoint: "GET /api/risk/risks".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        let fault = StoreFault::from(&err);
        assert_eq!(fault.kind, FaultKind::Status);
        assert!(fault.message.contains("GET /api/risk/risks"));
        assert!(fault.message.contains("503"));
    }

    #[test]
    fn application_error_keeps_server_message() {
        let err = ApiError::Application {
            endpoint: "POST /api/audit/audits".to_string(),
            message: "tenant suspended".to_string(),
        };
        let fault = StoreFault::from(&err);
        assert_eq!(fault.kind, FaultKind::Application);
        assert!(fault.message.contains("tenant suspended"));
    }

    #[test]
    fn display_includes_kind_label() {
        let fault = StoreFault::new(FaultKind::Snapshot, "disk full");
        assert_eq!(fault.to_string(), "snapshot fault: disk full");
    }
}
