//! In-memory storage backend using DashMap.
//!
//! Records live in one `DashMap<Uuid, serde_json::Value>` per
//! `(tenant, module, resource)` collection. Soft-delete state is carried
//! inside each record (`is_deleted` and the rest of the triad), so the
//! active and deleted views are filters over the same map.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

/// Addresses one tenant's records for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    pub tenant: String,
    pub module: String,
    pub resource: String,
}

struct Inner {
    collections: DashMap<CollectionKey, DashMap<Uuid, Value>>,
    secret: Option<String>,
}

/// Shared application state holding every tenant's in-memory collections.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone)]
pub struct StubState {
    inner: Arc<Inner>,
}

impl StubState {
    /// Open development mode: any well-formed bearer token is accepted.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Require every token's secret segment to equal `secret`.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::build(Some(secret.into()))
    }

    fn build(secret: Option<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                collections: DashMap::new(),
                secret,
            }),
        }
    }

    pub fn secret(&self) -> Option<&str> {
        self.inner.secret.as_deref()
    }

    pub fn collections(&self) -> &DashMap<CollectionKey, DashMap<Uuid, Value>> {
        &self.inner.collections
    }
}

impl Default for StubState {
    fn default() -> Self {
        Self::new()
    }
}
