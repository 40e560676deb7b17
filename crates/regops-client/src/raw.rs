//! Untyped per-resource client over `serde_json::Value`.
//!
//! The CLI and generic tooling address resources by runtime module and
//! resource segments instead of a typed [`Resource`](regops_core::Resource)
//! implementation. Same eight operations, same envelope handling; records
//! stay opaque JSON objects.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::Transport;

/// Untyped handle for one REST resource addressed by path segments.
#[derive(Debug, Clone)]
pub struct RawResourceClient {
    transport: Transport,
    module: String,
    resource: String,
}

impl RawResourceClient {
    pub(crate) fn new(transport: Transport, module: String, resource: String) -> Self {
        Self {
            transport,
            module,
            resource,
        }
    }

    fn collection_path(&self) -> String {
        format!("api/{}/{}", self.module, self.resource)
    }

    /// List active records.
    pub async fn list(&self) -> Result<Vec<Value>, ApiError> {
        let path = self.collection_path();
        let endpoint = format!("GET /{path}");
        self.transport
            .get_envelope::<Vec<Value>>(&path, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// List soft-deleted records.
    pub async fn list_deleted(&self) -> Result<Vec<Value>, ApiError> {
        let path = format!("{}/deleted", self.collection_path());
        let endpoint = format!("GET /{path}");
        self.transport
            .get_envelope::<Vec<Value>>(&path, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// Fetch one record by id. `None` when the server answers 404.
    pub async fn get(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let path = format!("{}/{id}", self.collection_path());
        let endpoint = format!("GET /{path}");
        match self
            .transport
            .get_envelope_or_404::<Value>(&path, &endpoint)
            .await?
        {
            Some(envelope) => envelope.into_data(&endpoint).map(Some),
            None => Ok(None),
        }
    }

    /// Create a record and return the server's canonical copy.
    pub async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        let path = self.collection_path();
        let endpoint = format!("POST /{path}");
        self.transport
            .post_envelope::<Value, Value>(&path, payload, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// Apply a shallow-merge patch to a record.
    pub async fn update(&self, id: &str, patch: &Value) -> Result<Option<Value>, ApiError> {
        let path = format!("{}/{id}", self.collection_path());
        let endpoint = format!("PUT /{path}");
        self.transport
            .put_envelope::<Value, Value>(&path, patch, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Soft-delete a record.
    pub async fn delete(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let path = format!("{}/{id}", self.collection_path());
        let endpoint = format!("DELETE /{path}");
        self.transport
            .delete_envelope::<Value>(&path, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Restore a soft-deleted record.
    pub async fn restore(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let path = format!("{}/{id}/restore", self.collection_path());
        let endpoint = format!("POST /{path}");
        self.transport
            .post_empty_envelope::<Value>(&path, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Permanently remove a soft-deleted record. Irreversible.
    pub async fn purge(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{id}/permanent", self.collection_path());
        let endpoint = format!("DELETE /{path}");
        self.transport
            .delete_envelope::<Value>(&path, &endpoint)
            .await?
            .ensure_success(&endpoint)
    }
}
