//! JSON export of the reconciled record set.
//!
//! Two documents are produced: the customers export (metadata + sorted
//! records) and a standalone summary report with quality and category
//! distributions. The exporter assumes its input is already deduplicated
//! and sorted by the merge stage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::EnrichedCustomer;

/// Quality score at or above which a record counts as high quality.
const HIGH_QUALITY_THRESHOLD: u8 = 90;

/// Quality score at or above which a record counts as medium quality.
const MEDIUM_QUALITY_THRESHOLD: u8 = 70;

/// Errors that can occur while writing export documents.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system error creating directories or writing the document.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document failed to serialize.
    #[error("failed to serialize export document: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// Counts of records per quality band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Records with score >= 90.
    pub high_quality: usize,
    /// Records with 70 <= score < 90.
    pub medium_quality: usize,
    /// Records with score < 70.
    pub low_quality: usize,
}

impl QualitySummary {
    /// Tallies the quality bands over a record set.
    #[must_use]
    pub fn from_customers(customers: &[EnrichedCustomer]) -> Self {
        let mut summary = Self::default();
        for customer in customers {
            if customer.data_quality_score >= HIGH_QUALITY_THRESHOLD {
                summary.high_quality += 1;
            } else if customer.data_quality_score >= MEDIUM_QUALITY_THRESHOLD {
                summary.medium_quality += 1;
            } else {
                summary.low_quality += 1;
            }
        }
        summary
    }
}

/// Metadata block of the customers export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub total_customers: usize,
    /// ISO-8601 UTC timestamp of the export.
    pub export_timestamp: DateTime<Utc>,
    pub data_quality_summary: QualitySummary,
}

/// Complete customers export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerExport {
    pub metadata: ExportMetadata,
    pub customers: Vec<EnrichedCustomer>,
}

impl CustomerExport {
    /// Builds the export document around an already-merged, already-sorted
    /// record set, stamped with the current time.
    #[must_use]
    pub fn new(customers: Vec<EnrichedCustomer>) -> Self {
        Self::with_timestamp(customers, Utc::now())
    }

    /// Builds the export document with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(customers: Vec<EnrichedCustomer>, timestamp: DateTime<Utc>) -> Self {
        Self {
            metadata: ExportMetadata {
                total_customers: customers.len(),
                export_timestamp: timestamp,
                data_quality_summary: QualitySummary::from_customers(&customers),
            },
            customers,
        }
    }
}

/// Standalone summary report with category distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_customers: usize,
    pub data_quality_summary: QualitySummary,
    pub engagement_distribution: BTreeMap<String, usize>,
    pub activity_distribution: BTreeMap<String, usize>,
    pub channel_distribution: BTreeMap<String, usize>,
    pub segment_distribution: BTreeMap<String, usize>,
    pub tier_distribution: BTreeMap<String, usize>,
    /// Mean quality score, rounded to two decimals. Zero for an empty set.
    pub average_quality_score: f64,
}

impl SummaryReport {
    /// Computes the report over the final record set.
    #[must_use]
    pub fn from_customers(customers: &[EnrichedCustomer]) -> Self {
        let mut engagement_distribution = BTreeMap::new();
        let mut activity_distribution = BTreeMap::new();
        let mut channel_distribution = BTreeMap::new();
        let mut segment_distribution = BTreeMap::new();
        let mut tier_distribution = BTreeMap::new();

        for customer in customers {
            bump(&mut engagement_distribution, customer.engagement_level.as_str());
            bump(&mut activity_distribution, customer.activity_status.as_str());
            bump(&mut channel_distribution, customer.acquisition_channel.as_str());
            bump(&mut segment_distribution, customer.market_segment.as_str());
            bump(&mut tier_distribution, customer.customer_tier.as_str());
        }

        let average_quality_score = if customers.is_empty() {
            0.0
        } else {
            let total: u64 = customers
                .iter()
                .map(|c| u64::from(c.data_quality_score))
                .sum();
            let mean = total as f64 / customers.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            total_customers: customers.len(),
            data_quality_summary: QualitySummary::from_customers(customers),
            engagement_distribution,
            activity_distribution,
            channel_distribution,
            segment_distribution,
            tier_distribution,
            average_quality_score,
        }
    }
}

fn bump(distribution: &mut BTreeMap<String, usize>, key: &str) {
    *distribution.entry(key.to_string()).or_insert(0) += 1;
}

/// Writes a document as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if the value cannot be serialized and
/// [`ExportError::Io`] on any file system failure.
pub async fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ExportError> {
    let body =
        serde_json::to_vec_pretty(value).map_err(|source| ExportError::Serialize { source })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ExportError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    tokio::fs::write(path, body)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), "export written");
    Ok(())
}
