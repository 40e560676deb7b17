//! Data subject request records (`privacy` module, `dsr-requests` resource).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use regops_core::{Lifecycle, RecordId, Resource, TenantId};

/// What the data subject is asking for, after the GDPR chapter III rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DsrRequestType {
    /// Copy of the subject's data.
    Access,
    /// Erasure ("right to be forgotten").
    Erasure,
    /// Correction of inaccurate data.
    Rectification,
    /// Machine-readable export.
    Portability,
    /// Objection to processing.
    Objection,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl DsrRequestType {
    /// Return the string representation of this request type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "ACCESS",
            Self::Erasure => "ERASURE",
            Self::Rectification => "RECTIFICATION",
            Self::Portability => "PORTABILITY",
            Self::Objection => "OBJECTION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DsrRequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfilment status of a data subject request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DsrStatus {
    /// Logged, identity not yet verified.
    Received,
    /// Verifying the requester's identity.
    Verifying,
    /// Being fulfilled.
    InProgress,
    /// Fulfilled and closed.
    Completed,
    /// Rejected (identity not verified, manifestly unfounded, etc.).
    Rejected,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl DsrStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::Verifying => "VERIFYING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for DsrStatus {
    fn default() -> Self {
        Self::Received
    }
}

impl std::fmt::Display for DsrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data subject request tracked for a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DsrRequest {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub subject_name: String,
    #[serde(default)]
    pub subject_email: Option<String>,
    pub request_type: DsrRequestType,
    #[serde(default)]
    pub status: DsrStatus,
    /// Statutory response deadline.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Resource for DsrRequest {
    const MODULE: &'static str = "privacy";
    const RESOURCE: &'static str = "dsr-requests";

    type Create = NewDsrRequest;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }
}

/// Client-settable payload for logging a data subject request.
#[derive(Debug, Serialize)]
pub struct NewDsrRequest {
    pub subject_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_email: Option<String>,
    pub request_type: DsrRequestType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
