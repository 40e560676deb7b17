//! The async store facade: one [`DomainStore`] per GRC resource.
//!
//! A store owns a typed API client, a [`RecordLedger`] guarded by a
//! `parking_lot::RwLock`, and the request gates. The lock is never held
//! across an `.await` point; suspension happens only at network and
//! snapshot I/O, so store methods stay callable from any task without
//! ordering hazards beyond the gates themselves.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use regops_client::ResourceClient;
use regops_core::{RecordId, Resource};

use crate::fault::{FaultKind, StoreFault};
use crate::generation::{CollectionGate, KeyedGate};
use crate::ledger::RecordLedger;
use crate::snapshot::SnapshotStore;

/// Decrements the in-flight counter when the request future settles or is
/// dropped.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn begin(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Client-side store for one resource type: active and soft-deleted
/// collections, loading/error observability, and the CRUD/soft-delete
/// operations of the uniform REST contract.
///
/// Every operation records its failure in the `last_error` slot *and*
/// returns it, leaving both collections exactly as they were. Stale
/// responses — a fetch issued before a mutation, or the earlier of two
/// racing updates to one record — are discarded by the generation gates
/// instead of overwriting fresher state.
#[derive(Debug)]
pub struct DomainStore<R: Resource> {
    client: ResourceClient<R>,
    ledger: RwLock<RecordLedger<R>>,
    active_gate: CollectionGate,
    deleted_gate: CollectionGate,
    record_gate: KeyedGate,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<StoreFault>>,
    snapshot: Option<SnapshotStore>,
}

impl<R: Resource> DomainStore<R> {
    /// Create a store with no snapshot persistence.
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            client,
            ledger: RwLock::new(RecordLedger::new()),
            active_gate: CollectionGate::new(),
            deleted_gate: CollectionGate::new(),
            record_gate: KeyedGate::new(),
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
            snapshot: None,
        }
    }

    /// Create a store that persists its collections under `snapshot` and
    /// hydrates from the previous snapshot before any network fetch.
    pub async fn with_snapshot(client: ResourceClient<R>, snapshot: SnapshotStore) -> Self {
        let ledger = match snapshot.load::<R>().await {
            Some((items, deleted_items)) => RecordLedger::from_parts(items, deleted_items),
            None => RecordLedger::new(),
        };
        Self {
            client,
            ledger: RwLock::new(ledger),
            active_gate: CollectionGate::new(),
            deleted_gate: CollectionGate::new(),
            record_gate: KeyedGate::new(),
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
            snapshot: Some(snapshot),
        }
    }

    /// Current active records, in server order.
    pub fn items(&self) -> Vec<R> {
        self.ledger.read().items().to_vec()
    }

    /// Current soft-deleted records, in server order.
    pub fn deleted_items(&self) -> Vec<R> {
        self.ledger.read().deleted_items().to_vec()
    }

    /// Look up an active record by id.
    pub fn find(&self, id: RecordId) -> Option<R> {
        self.ledger.read().find(id).cloned()
    }

    /// Whether any request is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The most recent failure, if the last completed operation failed.
    pub fn last_error(&self) -> Option<StoreFault> {
        self.last_error.lock().clone()
    }

    /// Discard the recorded failure.
    pub fn clear_error(&self) {
        *self.last_error.lock() = None;
    }

    /// Fetch the active collection, replacing `items` on success.
    ///
    /// On failure the previous records stay untouched and the fault is
    /// both recorded and returned. A response superseded by a newer fetch
    /// or mutation is discarded.
    pub async fn refresh(&self) -> Result<(), StoreFault> {
        let ticket = self.active_gate.issue();
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.list().await {
            Ok(records) => {
                if !self.active_gate.admit(ticket) {
                    tracing::debug!(
                        resource = %R::resource_path(),
                        "discarding superseded list response"
                    );
                    return Ok(());
                }
                self.ledger.write().apply_fetched_active(records);
                self.set_error(None);
                self.persist().await;
                Ok(())
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Fetch the soft-deleted collection, replacing `deleted_items` on
    /// success. Failure and supersession behave as in [`Self::refresh`].
    pub async fn refresh_deleted(&self) -> Result<(), StoreFault> {
        let ticket = self.deleted_gate.issue();
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.list_deleted().await {
            Ok(records) => {
                if !self.deleted_gate.admit(ticket) {
                    tracing::debug!(
                        resource = %R::resource_path(),
                        "discarding superseded deleted-list response"
                    );
                    return Ok(());
                }
                self.ledger.write().apply_fetched_deleted(records);
                self.set_error(None);
                self.persist().await;
                Ok(())
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Create a record; the server-returned record joins the end of
    /// `items`.
    pub async fn create(&self, payload: &R::Create) -> Result<R, StoreFault> {
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.create(payload).await {
            Ok(record) => {
                self.ledger.write().apply_created(record.clone());
                self.active_gate.invalidate();
                self.set_error(None);
                self.persist().await;
                Ok(record)
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Shallow-merge `patch` into the record, last write wins.
    ///
    /// Returns the record as now held in `items`, or `None` when the id
    /// has no active local record (no phantom is created) or the response
    /// was superseded by a newer mutation of the same record.
    pub async fn update(&self, id: RecordId, patch: &Value) -> Result<Option<R>, StoreFault> {
        let ticket = self.record_gate.issue(id);
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.update(id, patch).await {
            Ok(server) => {
                if !self.record_gate.admit(id, ticket) {
                    tracing::debug!(
                        resource = %R::resource_path(),
                        %id,
                        "discarding superseded update response"
                    );
                    return Ok(None);
                }
                let applied = self
                    .ledger
                    .write()
                    .apply_updated(id, server, patch, Utc::now());
                match applied {
                    Ok(applied) => {
                        self.active_gate.invalidate();
                        self.set_error(None);
                        self.persist().await;
                        Ok(applied)
                    }
                    Err(patch_err) => Err(self.record_fault(StoreFault::from(patch_err))),
                }
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Soft-delete a record, transferring it from `items` into
    /// `deleted_items` immediately.
    pub async fn delete(&self, id: RecordId) -> Result<Option<R>, StoreFault> {
        let ticket = self.record_gate.issue(id);
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.delete(id).await {
            Ok(server) => {
                if !self.record_gate.admit(id, ticket) {
                    return Ok(None);
                }
                let tombstone = self
                    .ledger
                    .write()
                    .apply_deleted(id, server, None, Utc::now());
                self.active_gate.invalidate();
                self.deleted_gate.invalidate();
                self.set_error(None);
                self.persist().await;
                Ok(tombstone)
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Restore a soft-deleted record, transferring it back into `items`
    /// immediately.
    pub async fn restore(&self, id: RecordId) -> Result<Option<R>, StoreFault> {
        let ticket = self.record_gate.issue(id);
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.restore(id).await {
            Ok(server) => {
                if !self.record_gate.admit(id, ticket) {
                    return Ok(None);
                }
                let restored = self.ledger.write().apply_restored(id, server, Utc::now());
                self.active_gate.invalidate();
                self.deleted_gate.invalidate();
                self.set_error(None);
                self.persist().await;
                Ok(restored)
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    /// Permanently delete a record. The id leaves both collections and no
    /// later fetch will reintroduce it.
    pub async fn purge(&self, id: RecordId) -> Result<(), StoreFault> {
        let ticket = self.record_gate.issue(id);
        let _loading = LoadingGuard::begin(&self.in_flight);

        match self.client.purge(id).await {
            Ok(()) => {
                if self.record_gate.admit(id, ticket) {
                    self.ledger.write().apply_purged(id);
                    self.record_gate.forget(id);
                    self.deleted_gate.invalidate();
                    self.set_error(None);
                    self.persist().await;
                }
                Ok(())
            }
            Err(err) => Err(self.record_fault(StoreFault::from(&err))),
        }
    }

    fn set_error(&self, fault: Option<StoreFault>) {
        *self.last_error.lock() = fault;
    }

    fn record_fault(&self, fault: StoreFault) -> StoreFault {
        self.set_error(Some(fault.clone()));
        fault
    }

    /// Rewrite the snapshot from the current collections. Persistence
    /// failures are reported through `last_error` but never fail the
    /// operation that triggered them.
    async fn persist(&self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let (items, deleted_items) = {
            let ledger = self.ledger.read();
            (ledger.items().to_vec(), ledger.deleted_items().to_vec())
        };
        if let Err(err) = snapshot.save::<R>(items, deleted_items).await {
            tracing::warn!(
                storage_key = %R::storage_key(),
                error = %err,
                "failed to persist store snapshot"
            );
            self.set_error(Some(StoreFault::new(FaultKind::Snapshot, err.to_string())));
        }
    }
}
