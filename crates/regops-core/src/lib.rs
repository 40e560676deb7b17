#![deny(missing_docs)]

//! # regops-core — Foundational Types for the RegOps Client Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, and `uuid` from the external ecosystem, and no I/O.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Identifiers are distinct
//!    types. You cannot pass a [`TenantId`] where a [`RecordId`] is expected.
//!
//! 2. **One lifecycle envelope.** Every domain record carries a single
//!    [`Lifecycle`] value holding the creation/update stamps and the
//!    soft-delete triad. Soft-delete state is read and written only through
//!    its methods, so a record can never end up half-tombstoned.
//!
//! 3. **[`Resource`] is the only seam.** The client and store layers are
//!    generic over the trait and never inspect domain attributes; a record's
//!    fields beyond identity and lifecycle stay opaque below the domain
//!    crate.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod patch;
pub mod resource;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{PatchError, ValidationError};
pub use identity::{RecordId, TenantId};
pub use lifecycle::Lifecycle;
pub use patch::{apply_to_record, shallow_merge};
pub use resource::Resource;
