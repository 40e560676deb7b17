//! Typed per-resource client: the eight CRUD/soft-delete operations for
//! one [`Resource`] implementation.

use std::marker::PhantomData;

use serde_json::Value;

use regops_core::{RecordId, Resource};

use crate::error::ApiError;
use crate::http::Transport;

/// Typed handle for one REST resource.
///
/// Cheap to clone; all handles created from the same
/// [`RegOpsClient`](crate::RegOpsClient) share its connection pool and
/// bearer credentials.
#[derive(Debug, Clone)]
pub struct ResourceClient<R: Resource> {
    transport: Transport,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            transport,
            _marker: PhantomData,
        }
    }

    /// List active records.
    ///
    /// Calls `GET {base_url}/api/<module>/<resource>`.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let path = R::resource_path();
        let endpoint = format!("GET /{path}");
        self.transport
            .get_envelope::<Vec<R>>(&path, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// List soft-deleted records.
    ///
    /// Calls `GET {base_url}/api/<module>/<resource>/deleted`.
    pub async fn list_deleted(&self) -> Result<Vec<R>, ApiError> {
        let path = format!("{}/deleted", R::resource_path());
        let endpoint = format!("GET /{path}");
        self.transport
            .get_envelope::<Vec<R>>(&path, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// Fetch one record by id. `None` when the server answers 404.
    ///
    /// Calls `GET {base_url}/api/<module>/<resource>/{id}`.
    pub async fn get(&self, id: RecordId) -> Result<Option<R>, ApiError> {
        let path = format!("{}/{id}", R::resource_path());
        let endpoint = format!("GET /{path}");
        match self
            .transport
            .get_envelope_or_404::<R>(&path, &endpoint)
            .await?
        {
            Some(envelope) => envelope.into_data(&endpoint).map(Some),
            None => Ok(None),
        }
    }

    /// Create a record from the client-settable payload and return the
    /// server's canonical copy (with id, tenant, stamps, derived fields).
    ///
    /// Calls `POST {base_url}/api/<module>/<resource>`.
    pub async fn create(&self, payload: &R::Create) -> Result<R, ApiError> {
        let path = R::resource_path();
        let endpoint = format!("POST /{path}");
        self.transport
            .post_envelope::<R, R::Create>(&path, payload, &endpoint)
            .await?
            .into_data(&endpoint)
    }

    /// Apply a shallow-merge patch to a record. Returns the updated record
    /// when the server echoes it; backends answering a bare success yield
    /// `None` and the caller merges locally.
    ///
    /// Calls `PUT {base_url}/api/<module>/<resource>/{id}`.
    pub async fn update(&self, id: RecordId, patch: &Value) -> Result<Option<R>, ApiError> {
        let path = format!("{}/{id}", R::resource_path());
        let endpoint = format!("PUT /{path}");
        self.transport
            .put_envelope::<R, Value>(&path, patch, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Soft-delete a record. Returns the tombstoned record when the server
    /// echoes it.
    ///
    /// Calls `DELETE {base_url}/api/<module>/<resource>/{id}`.
    pub async fn delete(&self, id: RecordId) -> Result<Option<R>, ApiError> {
        let path = format!("{}/{id}", R::resource_path());
        let endpoint = format!("DELETE /{path}");
        self.transport
            .delete_envelope::<R>(&path, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Restore a soft-deleted record. Returns the restored record when the
    /// server echoes it.
    ///
    /// Calls `POST {base_url}/api/<module>/<resource>/{id}/restore`.
    pub async fn restore(&self, id: RecordId) -> Result<Option<R>, ApiError> {
        let path = format!("{}/{id}/restore", R::resource_path());
        let endpoint = format!("POST /{path}");
        self.transport
            .post_empty_envelope::<R>(&path, &endpoint)
            .await?
            .into_optional_data(&endpoint)
    }

    /// Permanently remove a soft-deleted record. Irreversible.
    ///
    /// Calls `DELETE {base_url}/api/<module>/<resource>/{id}/permanent`.
    pub async fn purge(&self, id: RecordId) -> Result<(), ApiError> {
        let path = format!("{}/{id}/permanent", R::resource_path());
        let endpoint = format!("DELETE /{path}");
        self.transport
            .delete_envelope::<Value>(&path, &endpoint)
            .await?
            .ensure_success(&endpoint)
    }
}
