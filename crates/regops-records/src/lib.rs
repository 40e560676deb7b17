//! # regops-records — Typed GRC Domain Records
//!
//! One record type per GRC module, each implementing
//! [`Resource`](regops_core::Resource): identity, tenant scope, the shared
//! lifecycle envelope, and the module's domain attributes. This is the only
//! crate that knows what those attributes mean — the client and store
//! layers below stay generic.
//!
//! Wire conventions, uniform across the catalog:
//!
//! - snake_case field names, UUID string ids, RFC 3339 timestamps
//! - status vocabularies serialize SCREAMING_SNAKE_CASE and carry a
//!   `#[serde(other)] Unknown` arm so newer server values deserialize
//!   instead of failing
//! - inbound records tolerate omitted optional fields via
//!   `#[serde(default)]`; `deny_unknown_fields` is intentionally not used
//! - server-computed fields (`risk_score`) are carried verbatim, never
//!   recomputed client-side

pub mod audit;
pub mod catalog;
pub mod data_inventory;
pub mod dsr;
pub mod regulation;
pub mod risk;

pub use audit::{AuditRecord, AuditStatus, AuditType, NewAuditRecord};
pub use catalog::{ResourceDescriptor, CATALOG};
pub use data_inventory::{DataInventoryRecord, NewDataInventoryRecord, SensitivityLevel};
pub use dsr::{DsrRequest, DsrRequestType, DsrStatus, NewDsrRequest};
pub use regulation::{NewRegulation, Regulation, RegulationStatus};
pub use risk::{NewRiskEntry, RiskEntry, RiskStatus};
