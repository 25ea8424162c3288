//! Resilient client for the paginated customer API.
//!
//! This module covers the transport half of the pipeline:
//!
//! - [`PageClient`] fetches one page at a time with retry, fixed backoff,
//!   and distinct rate-limit handling
//! - [`fetch_all`] coordinates pagination and aggregates raw records
//! - [`FetchError`] is the transport error taxonomy; transport failures are
//!   fatal-and-reported, never silently skipped
//! - [`EventSink`] receives structured per-attempt events instead of the
//!   client logging through ambient global state

mod client;
mod error;
mod events;
mod paginator;
mod retry;

pub use client::PageClient;
pub use error::FetchError;
pub use events::{EventSink, FetchEvent, MemorySink, TracingSink};
pub use paginator::fetch_all;
pub use retry::{
    DEFAULT_BACKOFF_SCHEDULE, DEFAULT_MAX_RETRIES, FailureType, RetryDecision, RetryPolicy,
    classify_error, classify_http_status,
};
