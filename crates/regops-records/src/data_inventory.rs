//! Data inventory records (`privacy` module, `data-inventory` resource).
//!
//! The inventory backs DPIA work: what personal data lives where, how
//! sensitive it is, and how long it is retained.

use serde::{Deserialize, Serialize};

use regops_core::{Lifecycle, RecordId, Resource, TenantId};

/// Sensitivity classification of an inventoried data asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitivityLevel {
    Public,
    Internal,
    Confidential,
    Restricted,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl SensitivityLevel {
    /// Return the string representation of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Internal => "INTERNAL",
            Self::Confidential => "CONFIDENTIAL",
            Self::Restricted => "RESTRICTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for SensitivityLevel {
    fn default() -> Self {
        Self::Internal
    }
}

impl std::fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data asset in a tenant's processing inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataInventoryRecord {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub asset_name: String,
    /// System of record holding the asset, e.g. "crm" or "payroll-db".
    #[serde(default)]
    pub owning_system: Option<String>,
    /// Categories of personal data held, e.g. "contact", "financial".
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default)]
    pub sensitivity_level: SensitivityLevel,
    /// Retention period in days; `None` means no fixed retention.
    #[serde(default)]
    pub retention_period_days: Option<u32>,
    /// GDPR article 6 basis, e.g. "consent" or "legitimate-interest".
    #[serde(default)]
    pub lawful_basis: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Resource for DataInventoryRecord {
    const MODULE: &'static str = "privacy";
    const RESOURCE: &'static str = "data-inventory";

    type Create = NewDataInventoryRecord;

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

/// Client-settable payload for inventorying a data asset.
#[derive(Debug, Serialize)]
pub struct NewDataInventoryRecord {
    pub asset_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owning_system: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity_level: Option<SensitivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lawful_basis: Option<String>,
}
