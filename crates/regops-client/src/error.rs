//! RegOps API client error types.
//!
//! The taxonomy keeps the failure classes distinct instead of collapsing
//! them into one string: transport failure, non-2xx HTTP status,
//! application-level `success: false`, and decode failure each carry their
//! own variant with the endpoint that produced them.

/// Errors from RegOps API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API answered with a non-2xx status.
    #[error("RegOps API {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The API answered 2xx but reported `success: false`.
    #[error("RegOps API {endpoint} reported failure: {message}")]
    Application { endpoint: String, message: String },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The envelope reported success but carried no data where a payload
    /// is required.
    #[error("RegOps API {endpoint} returned success without data")]
    MissingData { endpoint: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// The HTTP status code, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a 404 for the addressed record.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Whether replaying the request could help. Only transport failures
    /// qualify; a server that answered made its decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers() {
        let err = ApiError::Status {
            endpoint: "http://api/api/risk/risks/abc".to_string(),
            status: 404,
            body: "{\"success\":false,\"error\":\"no such record\"}".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));

        let err = ApiError::Application {
            endpoint: "http://api/api/risk/risks".to_string(),
            message: "quota exceeded".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn only_transport_failures_are_retryable() {
        let err = ApiError::Status {
            endpoint: "http://api/api/risk/risks".to_string(),
            status: 503,
            body: String::new(),
        };
        assert!(!err.is_retryable());

        let err = ApiError::MissingData {
            endpoint: "http://api/api/risk/risks".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn display_includes_endpoint_and_detail() {
        let err = ApiError::MissingData {
            endpoint: "http://api/api/audit/audits".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "RegOps API http://api/api/audit/audits returned success without data"
        );

        let err = ApiError::Application {
            endpoint: "http://api/api/audit/audits".to_string(),
            message: "tenant suspended".to_string(),
        };
        assert!(err.to_string().contains("tenant suspended"));
    }
}
