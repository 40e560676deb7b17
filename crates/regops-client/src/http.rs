//! Shared HTTP plumbing behind the typed and raw resource clients.
//!
//! One [`Transport`] per [`RegOpsClient`](crate::RegOpsClient), cloned
//! cheaply into every resource handle. All verbs funnel through
//! [`retry_send`](crate::retry::retry_send) and decode into
//! [`ApiEnvelope`]; callers keep the short operation label (e.g.
//! `GET /api/risk/risks`) that ends up in error messages.

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::envelope::ApiEnvelope;
use crate::error::ApiError;
use crate::retry::retry_send;

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Absolute URL for a path relative to the API root. Tolerates base
    /// URLs with or without a trailing slash, including reverse-proxy
    /// prefixes.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        decode(resp, endpoint).await
    }

    /// GET where 404 means "no such record" rather than a failure.
    pub(crate) async fn get_envelope_or_404<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
    ) -> Result<Option<ApiEnvelope<T>>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(resp, endpoint).await.map(Some)
    }

    pub(crate) async fn post_envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.post(&url).json(body).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        decode(resp, endpoint).await
    }

    /// POST with no request body (the restore endpoint).
    pub(crate) async fn post_empty_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.post(&url).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        decode(resp, endpoint).await
    }

    pub(crate) async fn put_envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.put(&url).json(body).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        decode(resp, endpoint).await
    }

    pub(crate) async fn delete_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url_for(path);
        let resp = retry_send(endpoint, || self.http.delete(&url).send())
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        decode(resp, endpoint).await
    }
}

async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<ApiEnvelope<T>, ApiError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }

    resp.json().await.map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source: e,
    })
}
