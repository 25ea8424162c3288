//! HTTP client for fetching single pages with retry and backoff.
//!
//! [`PageClient`] wraps a pooled `reqwest::Client` and performs one logical
//! page retrieval per [`fetch_page`](PageClient::fetch_page) call: up to the
//! configured retry budget on transient failures, a fixed (non-jittered)
//! backoff schedule between attempts, and distinct handling of upstream rate
//! limiting. Backoff waits select against a caller-supplied cancellation
//! token so an overall deadline can abort a fetch mid-wait.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use super::error::FetchError;
use super::events::{EventSink, FetchEvent, TracingSink};
use super::retry::{FailureType, RetryDecision, RetryPolicy, classify_error};
use crate::model::ApiPage;

/// Connection establishment timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-request timeout covering the full response.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header carrying the API key, as required by the upstream.
const API_KEY_HEADER: &str = "x-api-key";

/// Client for the paginated customer API.
///
/// Created once and reused across pages to benefit from connection pooling.
///
/// # Example
///
/// ```no_run
/// use custsync::api::PageClient;
/// use tokio_util::sync::CancellationToken;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base_url = Url::parse("https://reqres.in")?;
/// let client = PageClient::new(base_url, "reqres-free-v1");
/// let page = client.fetch_page(1, &CancellationToken::new()).await?;
/// println!("total pages: {}", page.total_pages);
/// # Ok(())
/// # }
/// ```
pub struct PageClient {
    client: Client,
    base_url: Url,
    api_key: String,
    policy: RetryPolicy,
    sink: Arc<dyn EventSink>,
}

impl PageClient {
    /// Creates a client with the default retry policy and tracing sink.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static timeout
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self::with_policy(base_url, api_key, RetryPolicy::default())
    }

    /// Creates a client with an explicit retry policy.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static timeout
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_policy(base_url: Url, api_key: impl Into<String>, policy: RetryPolicy) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            policy,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the event sink, returning the modified client.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the event sink shared by this client.
    #[must_use]
    pub fn event_sink(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.sink)
    }

    /// Returns the retry policy in use.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches one page, retrying transient failures on the backoff schedule.
    ///
    /// Each attempt is recorded in the event sink with its attempt number
    /// and the wait that follows it. Cancellation is honored between
    /// attempts and during backoff waits.
    ///
    /// # Errors
    ///
    /// - [`FetchError::PageFetchExhausted`] when the retry budget runs out
    ///   (`rate_limited` set when the last rejection was a 429)
    /// - [`FetchError::HttpStatus`] for non-retriable statuses
    /// - [`FetchError::MalformedResponse`] when the body fails to parse
    /// - [`FetchError::Cancelled`] when the token fires
    #[instrument(skip(self, cancel))]
    pub async fn fetch_page(
        &self,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<ApiPage, FetchError> {
        let url = self.page_url(page);
        let mut attempt: u32 = 1;

        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            self.sink.record(FetchEvent::AttemptStarted { page, attempt });

            let error = match self.try_fetch(&url, page).await {
                Ok(body) => {
                    self.sink.record(FetchEvent::AttemptSucceeded {
                        page,
                        attempt,
                        records: body.data.len(),
                    });
                    return Ok(body);
                }
                Err(error) => error,
            };

            let failure = classify_error(&error);
            let rate_limited = failure == FailureType::RateLimited;

            match self.policy.should_retry(failure, attempt) {
                RetryDecision::Retry {
                    delay,
                    attempt: next_attempt,
                } => {
                    self.sink.record(FetchEvent::AttemptFailed {
                        page,
                        attempt,
                        rate_limited,
                        wait: Some(delay),
                        error: error.to_string(),
                    });

                    tokio::select! {
                        () = cancel.cancelled() => return Err(FetchError::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                    attempt = next_attempt;
                }
                RetryDecision::DoNotRetry { reason } => {
                    self.sink.record(FetchEvent::AttemptFailed {
                        page,
                        attempt,
                        rate_limited,
                        wait: None,
                        error: error.to_string(),
                    });
                    debug!(page, attempt, %reason, "giving up on page");

                    // Fatal failures surface as-is; an exhausted retry
                    // budget is escalated so callers see the page and the
                    // capacity-vs-outage distinction.
                    if failure == FailureType::Fatal {
                        return Err(error);
                    }
                    return Err(FetchError::exhausted(page, attempt, rate_limited, error));
                }
            }
        }
    }

    /// Performs a single GET attempt and parses the body.
    async fn try_fetch(&self, url: &Url, page: u32) -> Result<ApiPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::timeout(page)
                } else {
                    FetchError::network(page, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(std::string::ToString::to_string);
            return Err(FetchError::http_status_with_retry_after(
                page,
                status.as_u16(),
                retry_after,
            ));
        }

        response
            .json::<ApiPage>()
            .await
            .map_err(|e| FetchError::malformed(page, e.to_string()))
    }

    /// Builds `{base_url}/api/users?page={n}`, preserving any path prefix
    /// on the base URL.
    fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/api/users", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(Some(&format!("page={page}")));
        url
    }
}

impl std::fmt::Debug for PageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageClient")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
