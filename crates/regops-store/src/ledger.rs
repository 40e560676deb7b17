//! The pure reconciliation core behind every domain store.
//!
//! A [`RecordLedger`] holds the two insertion-ordered collections of one
//! resource — active records and soft-deleted records — and applies server
//! outcomes to them. It performs no I/O and takes no locks, which is what
//! makes the store's soft-delete contract testable in isolation.
//!
//! ## Membership invariant
//!
//! A record id is never present in both collections. Every apply function
//! removes the id from the opposite collection before inserting, so the
//! invariant holds structurally rather than by caller discipline.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use regops_core::{apply_to_record, PatchError, RecordId, Resource};

/// Active and soft-deleted collections for one resource type.
#[derive(Debug, Clone)]
pub struct RecordLedger<R> {
    items: Vec<R>,
    deleted_items: Vec<R>,
}

impl<R> Default for RecordLedger<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            deleted_items: Vec::new(),
        }
    }
}

impl<R: Resource> RecordLedger<R> {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted collections.
    ///
    /// Snapshot data is untrusted: duplicate ids within a collection keep
    /// their first occurrence, and an id present in both collections keeps
    /// the active copy (the next fetch is authoritative either way).
    pub fn from_parts(items: Vec<R>, deleted_items: Vec<R>) -> Self {
        let mut seen = HashSet::new();
        let mut ledger = Self::new();
        for record in items {
            if seen.insert(record.record_id()) {
                ledger.items.push(record);
            }
        }
        for record in deleted_items {
            if seen.insert(record.record_id()) {
                ledger.deleted_items.push(record);
            }
        }
        ledger
    }

    /// Active records, in server order.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Soft-deleted records, in server order.
    pub fn deleted_items(&self) -> &[R] {
        &self.deleted_items
    }

    /// Look up an active record by id.
    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.items.iter().find(|r| r.record_id() == id)
    }

    /// Look up a soft-deleted record by id.
    pub fn find_deleted(&self, id: RecordId) -> Option<&R> {
        self.deleted_items.iter().find(|r| r.record_id() == id)
    }

    /// Apply a successful active-list fetch: replace `items` wholesale.
    pub fn apply_fetched_active(&mut self, records: Vec<R>) {
        self.items = records;
        let active: HashSet<RecordId> = self.items.iter().map(|r| r.record_id()).collect();
        self.deleted_items.retain(|r| !active.contains(&r.record_id()));
    }

    /// Apply a successful deleted-list fetch: replace `deleted_items`
    /// wholesale.
    pub fn apply_fetched_deleted(&mut self, records: Vec<R>) {
        self.deleted_items = records;
        let deleted: HashSet<RecordId> =
            self.deleted_items.iter().map(|r| r.record_id()).collect();
        self.items.retain(|r| !deleted.contains(&r.record_id()));
    }

    /// Apply a successful create: the server-returned record joins the end
    /// of `items`, replacing in place if the id somehow already exists.
    pub fn apply_created(&mut self, record: R) {
        let id = record.record_id();
        self.remove_deleted(id);
        if let Some(slot) = self.items.iter_mut().find(|r| r.record_id() == id) {
            *slot = record;
        } else {
            self.items.push(record);
        }
    }

    /// Apply a successful update.
    ///
    /// With a server echo the echoed record replaces the local one in
    /// place. Without one the patch is shallow-merged into the local copy
    /// and `updated_at` refreshed to `at`. An id with no active local
    /// record is a no-op either way: no phantom entry is created.
    pub fn apply_updated(
        &mut self,
        id: RecordId,
        server: Option<R>,
        patch: &Value,
        at: DateTime<Utc>,
    ) -> Result<Option<R>, PatchError> {
        let replacement = match server {
            Some(record) => record,
            None => {
                let Some(current) = self.find(id) else {
                    return Ok(None);
                };
                let mut merged = apply_to_record(current, patch)?;
                merged.lifecycle_mut().touch(at);
                merged
            }
        };

        let rid = replacement.record_id();
        match self.items.iter_mut().find(|r| r.record_id() == rid) {
            Some(slot) => {
                *slot = replacement.clone();
                self.remove_deleted(rid);
                Ok(Some(replacement))
            }
            None => Ok(None),
        }
    }

    /// Apply a successful soft delete: move the record from `items` into
    /// `deleted_items` immediately, rather than waiting for a refetch.
    ///
    /// The server-echoed tombstone is preferred; without one the local copy
    /// is stamped with `actor`/`at`. Returns the tombstone now held in
    /// `deleted_items`, or `None` for an id this ledger has never seen.
    /// Deleting an already-deleted id is idempotent.
    pub fn apply_deleted(
        &mut self,
        id: RecordId,
        server: Option<R>,
        actor: Option<String>,
        at: DateTime<Utc>,
    ) -> Option<R> {
        let local = self.remove_active(id);
        match server {
            Some(tombstone) => {
                let tid = tombstone.record_id();
                self.remove_active(tid);
                self.remove_deleted(tid);
                self.deleted_items.push(tombstone.clone());
                Some(tombstone)
            }
            None => match local {
                Some(mut record) => {
                    record.lifecycle_mut().stamp_deleted(actor, at);
                    self.remove_deleted(id);
                    self.deleted_items.push(record.clone());
                    Some(record)
                }
                None => self.find_deleted(id).cloned(),
            },
        }
    }

    /// Apply a successful restore: move the record from `deleted_items`
    /// back into `items` immediately, rather than waiting for a refetch.
    ///
    /// The server-echoed record is preferred; without one the local
    /// tombstone has its soft-delete triad cleared and `updated_at`
    /// refreshed to `at`. Returns the record now active, or `None` for an
    /// unknown id. Restoring an already-active id is idempotent.
    pub fn apply_restored(
        &mut self,
        id: RecordId,
        server: Option<R>,
        at: DateTime<Utc>,
    ) -> Option<R> {
        let local = self.remove_deleted(id);
        match server {
            Some(record) => {
                let rid = record.record_id();
                self.remove_active(rid);
                self.remove_deleted(rid);
                self.items.push(record.clone());
                Some(record)
            }
            None => match local {
                Some(mut record) => {
                    record.lifecycle_mut().clear_deleted();
                    record.lifecycle_mut().touch(at);
                    self.remove_active(id);
                    self.items.push(record.clone());
                    Some(record)
                }
                None => self.find(id).cloned(),
            },
        }
    }

    /// Apply a successful permanent delete: the id leaves both collections
    /// for good.
    pub fn apply_purged(&mut self, id: RecordId) -> bool {
        let from_deleted = self.remove_deleted(id).is_some();
        let from_active = self.remove_active(id).is_some();
        from_deleted || from_active
    }

    fn remove_active(&mut self, id: RecordId) -> Option<R> {
        let idx = self.items.iter().position(|r| r.record_id() == id)?;
        Some(self.items.remove(idx))
    }

    fn remove_deleted(&mut self, id: RecordId) -> Option<R> {
        let idx = self.deleted_items.iter().position(|r| r.record_id() == id)?;
        Some(self.deleted_items.remove(idx))
    }
}
