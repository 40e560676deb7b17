//! Regulation tracking records (`regulatory` module).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use regops_core::{Lifecycle, RecordId, Resource, TenantId};

/// Where a tracked regulation sits in the applicability workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegulationStatus {
    /// On the radar, no applicability decision yet.
    Monitoring,
    /// Applicability review in progress.
    UnderReview,
    /// Applies to the tenant and requires implementation work.
    ActionRequired,
    /// Implementation complete and evidenced.
    Implemented,
    /// Forward-compatible catch-all for statuses the server introduces
    /// after this client version is deployed.
    #[serde(other)]
    Unknown,
}

impl RegulationStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monitoring => "MONITORING",
            Self::UnderReview => "UNDER_REVIEW",
            Self::ActionRequired => "ACTION_REQUIRED",
            Self::Implemented => "IMPLEMENTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for RegulationStatus {
    fn default() -> Self {
        Self::Monitoring
    }
}

impl std::fmt::Display for RegulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regulation tracked for one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regulation {
    pub id: RecordId,
    pub tenant_id: TenantId,
    /// Display title, e.g. "General Data Protection Regulation".
    pub title: String,
    /// Short citation code, e.g. "GDPR" or "EU 2016/679".
    #[serde(default)]
    pub reference_code: Option<String>,
    /// Issuing authority or regulator.
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: RegulationStatus,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Resource for Regulation {
    const MODULE: &'static str = "regulatory";
    const RESOURCE: &'static str = "regulations";

    type Create = NewRegulation;

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

/// Client-settable payload for creating a regulation.
#[derive(Debug, Serialize)]
pub struct NewRegulation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegulationStatus>,
}
