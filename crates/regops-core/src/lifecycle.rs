//! # Record Lifecycle Envelope
//!
//! Every domain record carries one [`Lifecycle`] value: the server-stamped
//! creation/update instants plus the soft-delete triad (`is_deleted`,
//! `deleted_at`, `deleted_by`). The triad moves together — a record is
//! either fully tombstoned or not tombstoned at all when stamped through
//! this type. Records deserialized off the wire are taken as the server
//! sent them.
//!
//! Serialized flattened into the record object, so the wire shape matches
//! the flat field layout backends produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation/update stamps and soft-delete state shared by all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    is_deleted: bool,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    deleted_by: Option<String>,
}

impl Lifecycle {
    /// Fresh envelope for a record created at `now`. Not tombstoned.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// When the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the record is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// When the record was soft-deleted, if it is.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Who soft-deleted the record, if known.
    pub fn deleted_by(&self) -> Option<&str> {
        self.deleted_by.as_deref()
    }

    /// Whether the record belongs in the active collection.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Record a modification at `at`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    /// Tombstone the record at `at`, attributed to `actor` when known.
    pub fn stamp_deleted(&mut self, actor: Option<String>, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.deleted_by = actor;
    }

    /// Clear the tombstone, returning the record to the active state.
    pub fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.deleted_by = None;
    }
}
