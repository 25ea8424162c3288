//! Data model for the customer sync pipeline.
//!
//! Two shapes flow through the pipeline: [`RawCustomer`] as returned by the
//! upstream API (fields may be absent or empty), and [`EnrichedCustomer`],
//! the analytics-ready record produced by enrichment. Raw records are never
//! rejected for missing fields; incompleteness is absorbed into the quality
//! score instead.

use serde::{Deserialize, Serialize};

/// One customer record as returned by the upstream API.
///
/// All fields except `id` are optional: the upstream is unreliable by design
/// and records with absent or empty fields must still flow through the
/// pipeline. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCustomer {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One page of the upstream API response.
///
/// Deserialization is the parse-or-reject boundary: a body that does not fit
/// this shape is a malformed response and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPage {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<RawCustomer>,
}

/// Customer engagement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
    Unknown,
}

/// Whether the customer is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Inactive,
    Unknown,
}

/// Channel through which the customer was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionChannel {
    Website,
    Mobile,
    Email,
}

/// Geographic market segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSegment {
    #[serde(rename = "US-West")]
    UsWest,
    #[serde(rename = "US-East")]
    UsEast,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "APAC")]
    Apac,
}

/// Commercial tier of the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Basic,
    Premium,
    Enterprise,
}

impl EngagementLevel {
    /// Wire-format name, used as a distribution key in summary reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl ActivityStatus {
    /// Wire-format name, used as a distribution key in summary reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }
}

impl AcquisitionChannel {
    /// Wire-format name, used as a distribution key in summary reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Mobile => "mobile",
            Self::Email => "email",
        }
    }
}

impl MarketSegment {
    /// Wire-format name, used as a distribution key in summary reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UsWest => "US-West",
            Self::UsEast => "US-East",
            Self::Eu => "EU",
            Self::Apac => "APAC",
        }
    }
}

impl CustomerTier {
    /// Wire-format name, used as a distribution key in summary reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }
}

/// Analytics-ready customer record produced by enrichment.
///
/// Created once per raw record and never mutated afterwards; deduplication
/// discards losing records rather than editing them. `customer_id` is the
/// stable identity key and is unique in the final output set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedCustomer {
    pub customer_id: u64,
    pub full_name: String,
    pub email_domain: String,
    pub engagement_level: EngagementLevel,
    pub activity_status: ActivityStatus,
    pub acquisition_channel: AcquisitionChannel,
    pub market_segment: MarketSegment,
    pub customer_tier: CustomerTier,
    /// Completeness/validity measure in [0, 100], derived by fixed per-field
    /// deductions of 10 points each.
    pub data_quality_score: u8,
}
