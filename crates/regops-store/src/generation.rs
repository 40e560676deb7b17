//! Last-issued-wins request gating.
//!
//! Every request takes a ticket from a gate before it is sent; the response
//! is applied only if the ticket is still the newest when it lands. Issuing
//! a newer ticket supersedes all older ones, so a slow response from an
//! earlier request cannot overwrite state produced by a later one. Ordering
//! follows request issue order, not network arrival order.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use regops_core::RecordId;

/// Gate for whole-collection operations (list fetches).
///
/// Mutations that change the collection call [`CollectionGate::invalidate`]
/// so that any fetch issued before the mutation is discarded when it
/// eventually resolves.
#[derive(Debug, Default)]
pub struct CollectionGate {
    latest: AtomicU64,
}

impl CollectionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a request about to be sent.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Supersede all outstanding tickets without sending a request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether a response holding `ticket` is still the newest.
    pub fn admit(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// Gate for per-record operations, keyed by [`RecordId`].
///
/// Two rapid mutations of the same record race only up to the gate: the
/// response to the earlier one is discarded if the later one was issued
/// before it landed. Mutations of different records never interact.
#[derive(Debug, Default)]
pub struct KeyedGate {
    latest: DashMap<RecordId, u64>,
}

impl KeyedGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a request that targets `id`.
    pub fn issue(&self, id: RecordId) -> u64 {
        let mut entry = self.latest.entry(id).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Whether a response holding `ticket` for `id` is still the newest.
    pub fn admit(&self, id: RecordId, ticket: u64) -> bool {
        self.latest.get(&id).map(|g| *g == ticket).unwrap_or(false)
    }

    /// Drop the counter for a record that no longer exists.
    pub fn forget(&self, id: RecordId) {
        self.latest.remove(&id);
    }
}
