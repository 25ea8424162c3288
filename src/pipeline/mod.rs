//! Enrichment, quality scoring, and deduplication.
//!
//! This is the reconcile half of the pipeline. [`enrich`] turns raw records
//! into analytics records and scores their completeness; [`merge`] collapses
//! duplicate customer IDs and produces the final sorted sequence. Neither
//! stage can fail: bad data degrades scores instead of raising errors.

mod assign;
mod dedupe;
mod enrich;

pub use assign::{CategoryAssigner, WeightedAssigner};
pub use dedupe::merge;
pub use enrich::enrich;
