//! Custsync Core Library
//!
//! This library implements a resilient fetch-and-reconcile pipeline for
//! customer records: a retrying paginated HTTP client feeding enrichment,
//! quality scoring, deduplication, and JSON export.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Paginated API client with retry, backoff, and rate-limit handling
//! - [`pipeline`] - Enrichment, quality scoring, and deduplication
//! - [`export`] - JSON export documents and summary reporting
//! - [`config`] - Pipeline configuration surface
//! - [`model`] - Raw and enriched record shapes
//!
//! Transport failures abort the run with a typed error; data-quality
//! failures never do — they degrade the record's quality score instead.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod export;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use api::{
    DEFAULT_BACKOFF_SCHEDULE, DEFAULT_MAX_RETRIES, EventSink, FetchError, FetchEvent, PageClient,
    RetryPolicy, fetch_all,
};
pub use config::{DEFAULT_SEED, PipelineConfig};
pub use export::{CustomerExport, SummaryReport};
pub use model::{ApiPage, EnrichedCustomer, RawCustomer};
pub use pipeline::{CategoryAssigner, WeightedAssigner, enrich, merge};
