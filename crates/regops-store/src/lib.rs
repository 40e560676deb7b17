//! # regops-store — Soft-delete CRUD stores over the RegOps API
//!
//! Client-side state management for the GRC modules: each store mediates
//! between one REST resource and the pair of local collections every
//! screen renders from, `items` and `deleted_items`.
//!
//! ## Architecture
//!
//! Three layers, separated so the behavioral contract is testable without
//! a network:
//!
//! 1. [`RecordLedger`] — pure reconciliation: applies server outcomes to
//!    the two collections and enforces the membership invariant (a record
//!    id lives in at most one collection at a time).
//! 2. [`DomainStore`] — the async facade: issues requests through a typed
//!    [`regops_client::ResourceClient`], gates responses so the last
//!    *issued* request wins rather than the last *arrived*, tracks
//!    `is_loading`/`last_error`, and rewrites the snapshot after every
//!    successful mutation.
//! 3. [`StoreRegistry`] — the composition root owning one store per GRC
//!    module.
//!
//! ## Soft-delete contract
//!
//! Delete and restore transfer the record between the two collections
//! immediately, using the server echo when present and a locally stamped
//! copy otherwise — a deleted record never silently vanishes until the
//! next refetch. Permanent deletion removes the record from both
//! collections for good.

pub mod fault;
pub mod generation;
pub mod ledger;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use fault::{FaultKind, StoreFault};
pub use generation::{CollectionGate, KeyedGate};
pub use ledger::RecordLedger;
pub use registry::StoreRegistry;
pub use snapshot::{SnapshotError, SnapshotStore};
pub use store::DomainStore;
