//! Risk register records (`risk` module).
//!
//! `risk_score` is server-computed from likelihood × impact. The client
//! carries it verbatim and never recomputes it — a record deserialized
//! with a score that disagrees with its factors is the server's business.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use regops_core::{Lifecycle, RecordId, Resource, TenantId, ValidationError};

/// Treatment status of a risk register entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    /// Identified, no treatment decided.
    Open,
    /// Treatment plan in progress.
    Mitigating,
    /// Risk accepted by its owner.
    Accepted,
    /// Closed out.
    Closed,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl RiskStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Mitigating => "MITIGATING",
            Self::Accepted => "ACCEPTED",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for RiskStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a tenant's risk register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    /// Probability rating on the 1–5 scale.
    pub likelihood: u8,
    /// Severity rating on the 1–5 scale.
    pub impact: u8,
    /// Server-computed composite score; opaque to the client.
    #[serde(default)]
    pub risk_score: Option<u32>,
    #[serde(default)]
    pub status: RiskStatus,
    #[serde(default)]
    pub review_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Resource for RiskEntry {
    const MODULE: &'static str = "risk";
    const RESOURCE: &'static str = "risks";

    type Create = NewRiskEntry;

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

/// Client-settable payload for creating a risk entry.
///
/// Constructed through [`NewRiskEntry::new`], which enforces the 1–5 rating
/// scale before anything reaches the wire. `risk_score` is deliberately not
/// settable.
#[derive(Debug, Serialize)]
pub struct NewRiskEntry {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    likelihood: u8,
    impact: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<RiskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_date: Option<NaiveDate>,
}

impl NewRiskEntry {
    /// Create a risk payload, validating the rating scale.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for a blank title and
    /// [`ValidationError::OutOfRange`] when either rating falls outside
    /// 1–5.
    pub fn new(
        title: impl Into<String>,
        likelihood: u8,
        impact: u8,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        for (field, value) in [("likelihood", likelihood), ("impact", impact)] {
            if !(1..=5).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: i64::from(value),
                    min: 1,
                    max: 5,
                });
            }
        }

        Ok(Self {
            title,
            category: None,
            owner: None,
            likelihood,
            impact,
            status: None,
            review_date: None,
        })
    }

    /// Set the risk category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the risk owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the initial treatment status.
    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the next review date.
    pub fn with_review_date(mut self, review_date: NaiveDate) -> Self {
        self.review_date = Some(review_date);
        self
    }
}
