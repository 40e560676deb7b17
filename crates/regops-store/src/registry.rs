//! Composition root for the per-module stores.
//!
//! No module-level singletons: whoever owns a [`StoreRegistry`] owns every
//! store in it, and tests build throwaway registries against throwaway
//! servers. All stores share one [`RegOpsClient`] connection pool and, when
//! a state directory is given, one snapshot directory.

use std::path::Path;
use std::sync::Arc;

use regops_client::RegOpsClient;
use regops_core::Resource;
use regops_records::{AuditRecord, DataInventoryRecord, DsrRequest, Regulation, RiskEntry};

use crate::snapshot::SnapshotStore;
use crate::store::DomainStore;

/// One explicitly-owned store per GRC module.
#[derive(Debug)]
pub struct StoreRegistry {
    regulations: Arc<DomainStore<Regulation>>,
    risks: Arc<DomainStore<RiskEntry>>,
    dsr_requests: Arc<DomainStore<DsrRequest>>,
    data_inventory: Arc<DomainStore<DataInventoryRecord>>,
    audits: Arc<DomainStore<AuditRecord>>,
}

impl StoreRegistry {
    /// Build the registry. With a `state_dir` every store hydrates from
    /// its snapshot before any network fetch; without one, stores start
    /// empty and nothing is persisted.
    pub async fn new(client: &RegOpsClient, state_dir: Option<&Path>) -> Self {
        let snapshot = state_dir.map(SnapshotStore::new);
        Self {
            regulations: build(client, snapshot.as_ref()).await,
            risks: build(client, snapshot.as_ref()).await,
            dsr_requests: build(client, snapshot.as_ref()).await,
            data_inventory: build(client, snapshot.as_ref()).await,
            audits: build(client, snapshot.as_ref()).await,
        }
    }

    /// Regulation tracking (`regulatory/regulations`).
    pub fn regulations(&self) -> Arc<DomainStore<Regulation>> {
        Arc::clone(&self.regulations)
    }

    /// Risk register (`risk/risks`).
    pub fn risks(&self) -> Arc<DomainStore<RiskEntry>> {
        Arc::clone(&self.risks)
    }

    /// Data subject requests (`privacy/dsr-requests`).
    pub fn dsr_requests(&self) -> Arc<DomainStore<DsrRequest>> {
        Arc::clone(&self.dsr_requests)
    }

    /// Data inventory (`privacy/data-inventory`).
    pub fn data_inventory(&self) -> Arc<DomainStore<DataInventoryRecord>> {
        Arc::clone(&self.data_inventory)
    }

    /// Audit management (`audit/audits`).
    pub fn audits(&self) -> Arc<DomainStore<AuditRecord>> {
        Arc::clone(&self.audits)
    }
}

async fn build<R: Resource>(
    client: &RegOpsClient,
    snapshot: Option<&SnapshotStore>,
) -> Arc<DomainStore<R>> {
    let resource_client = client.resource::<R>();
    match snapshot {
        Some(snapshot) => Arc::new(DomainStore::with_snapshot(resource_client, snapshot.clone()).await),
        None => Arc::new(DomainStore::new(resource_client)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use regops_client::ApiConfig;

    fn offline_client() -> RegOpsClient {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".parse().unwrap(),
            api_token: None,
            timeout_secs: 1,
        };
        RegOpsClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn registry_builds_empty_stores_without_state_dir() {
        let registry = StoreRegistry::new(&offline_client(), None).await;
        assert!(registry.risks().items().is_empty());
        assert!(registry.regulations().items().is_empty());
        assert!(registry.audits().deleted_items().is_empty());
        assert!(!registry.dsr_requests().is_loading());
        assert!(registry.data_inventory().last_error().is_none());
    }

    #[tokio::test]
    async fn registry_accessors_share_one_store_per_module() {
        let registry = StoreRegistry::new(&offline_client(), None).await;
        let a = registry.risks();
        let b = registry.risks();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
