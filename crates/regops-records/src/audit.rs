//! Audit engagement records (`audit` module).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use regops_core::{Lifecycle, RecordId, Resource, TenantId};

/// Who runs the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditType {
    Internal,
    External,
    Regulatory,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl AuditType {
    /// Return the string representation of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "INTERNAL",
            Self::External => "EXTERNAL",
            Self::Regulatory => "REGULATORY",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for AuditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage of the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Planned,
    Fieldwork,
    Reporting,
    Closed,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl AuditStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Fieldwork => "FIELDWORK",
            Self::Reporting => "REPORTING",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for AuditStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit engagement tracked for a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub title: String,
    pub audit_type: AuditType,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub lead_auditor: Option<String>,
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
    #[serde(default)]
    pub findings_count: u32,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Resource for AuditRecord {
    const MODULE: &'static str = "audit";
    const RESOURCE: &'static str = "audits";

    type Create = NewAuditRecord;

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

/// Client-settable payload for planning an audit engagement.
#[derive(Debug, Serialize)]
pub struct NewAuditRecord {
    pub title: String,
    pub audit_type: AuditType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_auditor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_on: Option<NaiveDate>,
}
