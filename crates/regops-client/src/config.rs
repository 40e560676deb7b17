//! RegOps API client configuration.
//!
//! One base URL for the whole GRC API; every resource hangs off it at
//! `api/<module>/<resource>`. Override via environment variables or
//! explicit construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for connecting to the RegOps GRC API.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://grc.regops.example`.
    pub base_url: Url,
    /// Bearer token for API authentication. `None` sends requests without
    /// an `Authorization` header and lets the server reject them — tenant
    /// scoping lives inside the token, never in the URL.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGOPS_API_URL` (required)
    /// - `REGOPS_API_TOKEN` (optional; absent means unauthenticated
    ///   requests, which the server will reject)
    /// - `REGOPS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("REGOPS_API_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("REGOPS_API_URL".to_string(), e.to_string()))?;

        let api_token = match std::env::var("REGOPS_API_TOKEN") {
            Ok(token) => Some(Zeroizing::new(token)),
            Err(_) => {
                tracing::warn!("REGOPS_API_TOKEN not set; requests will be unauthenticated");
                None
            }
        };

        Ok(Self {
            base_url,
            api_token,
            timeout_secs: std::env::var("REGOPS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing to a local server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local(port: u16, token: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: Some(Zeroizing::new(token.to_string())),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REGOPS_API_URL environment variable is required")]
    MissingBaseUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not permitted in an HTTP header")]
    InvalidToken,
}
