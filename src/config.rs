//! Pipeline configuration.

use std::time::Duration;

use url::Url;

use crate::api::{DEFAULT_BACKOFF_SCHEDULE, DEFAULT_MAX_RETRIES, RetryPolicy};

/// Default random seed, fixed so repeat runs reproduce identical output.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration surface consumed by the pipeline core.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the upstream customer API.
    pub base_url: Url,
    /// API key sent as `x-api-key` on every request.
    pub api_key: String,
    /// Retries allowed per page after the initial attempt.
    pub max_retries: u32,
    /// Fixed waits between attempts.
    pub backoff_schedule: Vec<Duration>,
    /// Seed for the category assigner.
    pub seed: u64,
}

impl PipelineConfig {
    /// Creates a configuration with default retry, backoff, and seed values.
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_schedule: DEFAULT_BACKOFF_SCHEDULE.to_vec(),
            seed: DEFAULT_SEED,
        }
    }

    /// Builds the retry policy described by this configuration.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.backoff_schedule.clone())
    }
}
