//! Error types for the API fetch module.
//!
//! Transport failures are fatal-and-reported: a page that cannot be fetched
//! aborts the whole run rather than leaving a silent gap in the record set.
//! Data-quality problems, by contrast, never surface here — they are absorbed
//! by enrichment and reflected in the quality score.

use thiserror::Error;

/// Errors that can occur while fetching pages from the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS, etc.)
    #[error("network error fetching page {page}: {source}")]
    Network {
        /// The page whose request failed.
        page: u32,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before a response arrived.
    #[error("timeout fetching page {page}")]
    Timeout {
        /// The page whose request timed out.
        page: u32,
    },

    /// Non-2xx HTTP response.
    #[error("HTTP {status} fetching page {page}")]
    HttpStatus {
        /// The page whose request was rejected.
        page: u32,
        /// The HTTP status code.
        status: u16,
        /// The Retry-After header value, if present (429 responses).
        retry_after: Option<String>,
    },

    /// The response body does not parse into the expected page shape.
    ///
    /// Never retried: a parse failure will not fix itself and retrying it
    /// wastes the retry budget.
    #[error("malformed response body for page {page}: {detail}")]
    MalformedResponse {
        /// The page whose body failed to parse.
        page: u32,
        /// Parser diagnostic.
        detail: String,
    },

    /// All retry attempts for a page were exhausted.
    ///
    /// `rate_limited` distinguishes upstream capacity problems (429) from
    /// outages (5xx) so callers can react differently.
    #[error("page {page} failed after {attempts} attempts: {cause}")]
    PageFetchExhausted {
        /// The page that could not be fetched.
        page: u32,
        /// Total attempts made, including the initial one.
        attempts: u32,
        /// Whether the final failure was a rate-limit rejection.
        rate_limited: bool,
        /// The error from the last attempt.
        #[source]
        cause: Box<FetchError>,
    },

    /// The caller's cancellation signal fired during the fetch.
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(page: u32, source: reqwest::Error) -> Self {
        Self::Network { page, source }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(page: u32) -> Self {
        Self::Timeout { page }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn http_status(page: u32, status: u16) -> Self {
        Self::HttpStatus {
            page,
            status,
            retry_after: None,
        }
    }

    /// Creates an HTTP status error carrying a Retry-After header value.
    #[must_use]
    pub fn http_status_with_retry_after(
        page: u32,
        status: u16,
        retry_after: Option<String>,
    ) -> Self {
        Self::HttpStatus {
            page,
            status,
            retry_after,
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(page: u32, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            page,
            detail: detail.into(),
        }
    }

    /// Creates an exhaustion error wrapping the last attempt's failure.
    #[must_use]
    pub fn exhausted(page: u32, attempts: u32, rate_limited: bool, cause: FetchError) -> Self {
        Self::PageFetchExhausted {
            page,
            attempts,
            rate_limited,
            cause: Box::new(cause),
        }
    }

    /// Returns true if this error is an exhaustion caused by rate limiting.
    #[must_use]
    pub fn is_rate_limited_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::PageFetchExhausted {
                rate_limited: true,
                ..
            }
        )
    }
}

// Note on From trait implementations:
// No blanket `From<reqwest::Error>` is provided because every variant needs
// the page number for context, which the source error does not carry. The
// helper constructors are the intended construction path.
