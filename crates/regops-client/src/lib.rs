//! # regops-client — Typed Rust client for the RegOps GRC API
//!
//! Every GRC resource speaks the same uniform contract, one collection per
//! module/resource pair:
//!
//! | Method | Path (relative to base URL) | Operation |
//! |--------|-----------------------------|-----------|
//! | GET    | `/api/<module>/<resource>` | List active records |
//! | GET    | `/api/<module>/<resource>/deleted` | List soft-deleted records |
//! | GET    | `/api/<module>/<resource>/{id}` | Get by id |
//! | POST   | `/api/<module>/<resource>` | Create |
//! | PUT    | `/api/<module>/<resource>/{id}` | Shallow-merge update |
//! | DELETE | `/api/<module>/<resource>/{id}` | Soft delete |
//! | POST   | `/api/<module>/<resource>/{id}/restore` | Restore |
//! | DELETE | `/api/<module>/<resource>/{id}/permanent` | Permanent delete |
//!
//! Responses are wrapped in `{ "success": bool, "data": ..., "error": ... }`.
//!
//! ## Architecture
//!
//! One [`RegOpsClient`] per process, built from [`ApiConfig`]: a single
//! `reqwest` connection pool carrying the bearer token as a default header.
//! [`RegOpsClient::resource`] hands out typed [`ResourceClient`] handles
//! for anything implementing [`regops_core::Resource`];
//! [`RegOpsClient::raw`] hands out [`RawResourceClient`] handles addressed
//! by runtime path segments for generic tooling.
//!
//! Authentication is bearer-only and tenant scoping is implicit in the
//! token — no tenant id ever appears in a URL or query string.

pub mod config;
pub mod envelope;
pub mod error;
pub(crate) mod http;
pub mod raw;
pub mod resource;
pub(crate) mod retry;

pub use config::{ApiConfig, ConfigError};
pub use envelope::ApiEnvelope;
pub use error::ApiError;
pub use raw::RawResourceClient;
pub use resource::ResourceClient;

use std::time::Duration;

use regops_core::Resource;

use crate::http::Transport;

/// Top-level RegOps API client. Hands out per-resource handles sharing
/// one connection pool.
#[derive(Debug, Clone)]
pub struct RegOpsClient {
    transport: Transport,
}

impl RegOpsClient {
    /// Create a new API client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if let Some(token) = &config.api_token {
            let mut headers = reqwest::header::HeaderMap::new();
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| ApiError::Config(ConfigError::InvalidToken))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http = builder.build().map_err(|e| ApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            transport: Transport::new(http, config.base_url),
        })
    }

    /// Typed handle for one resource.
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.transport.clone())
    }

    /// Untyped handle for a resource addressed by runtime path segments.
    pub fn raw(&self, module: impl Into<String>, resource: impl Into<String>) -> RawResourceClient {
        RawResourceClient::new(self.transport.clone(), module.into(), resource.into())
    }
}
