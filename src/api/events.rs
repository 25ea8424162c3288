//! Structured fetch events and the injectable sink that records them.
//!
//! The page client does not log through ambient global state; it records
//! [`FetchEvent`]s into an [`EventSink`] supplied by the caller. The default
//! [`TracingSink`] forwards events to `tracing`, while tests inject a
//! collecting sink to assert on attempt sequencing without capturing output
//! streams.

use std::time::Duration;

use tracing::{info, warn};

/// One structured event emitted by the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A request attempt for a page is starting.
    AttemptStarted { page: u32, attempt: u32 },

    /// An attempt succeeded.
    AttemptSucceeded {
        page: u32,
        attempt: u32,
        records: usize,
    },

    /// An attempt failed. `wait` is the backoff before the next attempt,
    /// or `None` when no retry follows.
    AttemptFailed {
        page: u32,
        attempt: u32,
        rate_limited: bool,
        wait: Option<Duration>,
        error: String,
    },

    /// Page 1 revealed the total page count.
    TotalPagesDiscovered { total_pages: u32 },

    /// All pages were fetched and aggregated.
    FetchCompleted { pages: u32, records: usize },
}

/// Sink for structured fetch events.
pub trait EventSink: Send + Sync {
    /// Records one event. Implementations must not fail.
    fn record(&self, event: FetchEvent);
}

/// Default sink that forwards events to `tracing`.
///
/// Rate-limit failures are logged distinctly from server errors so capacity
/// problems stand out in the logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: FetchEvent) {
        match event {
            FetchEvent::AttemptStarted { page, attempt } => {
                info!(page, attempt, "fetching page");
            }
            FetchEvent::AttemptSucceeded {
                page,
                attempt,
                records,
            } => {
                info!(page, attempt, records, "page fetched");
            }
            FetchEvent::AttemptFailed {
                page,
                attempt,
                rate_limited: true,
                wait,
                error,
            } => {
                warn!(
                    page,
                    attempt,
                    wait_ms = wait.map(|w| w.as_millis() as u64),
                    %error,
                    "rate limited by upstream"
                );
            }
            FetchEvent::AttemptFailed {
                page,
                attempt,
                rate_limited: false,
                wait,
                error,
            } => {
                warn!(
                    page,
                    attempt,
                    wait_ms = wait.map(|w| w.as_millis() as u64),
                    %error,
                    "page fetch attempt failed"
                );
            }
            FetchEvent::TotalPagesDiscovered { total_pages } => {
                info!(total_pages, "discovered total page count");
            }
            FetchEvent::FetchCompleted { pages, records } => {
                info!(pages, records, "fetch complete");
            }
        }
    }
}

/// Sink that collects events in memory, in arrival order.
///
/// Intended for tests and diagnostics where asserting on the exact attempt
/// sequence matters more than log output.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<FetchEvent>>,
}

impl MemorySink {
    /// Returns a snapshot of all events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<FetchEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: FetchEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order() {
        let sink = MemorySink::default();
        sink.record(FetchEvent::AttemptStarted {
            page: 1,
            attempt: 1,
        });
        sink.record(FetchEvent::AttemptSucceeded {
            page: 1,
            attempt: 1,
            records: 6,
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            FetchEvent::AttemptStarted {
                page: 1,
                attempt: 1
            }
        );
    }

    #[test]
    fn test_tracing_sink_accepts_all_event_kinds() {
        // Smoke test: TracingSink must not panic on any variant.
        let sink = TracingSink;
        sink.record(FetchEvent::AttemptStarted {
            page: 1,
            attempt: 1,
        });
        sink.record(FetchEvent::AttemptFailed {
            page: 1,
            attempt: 1,
            rate_limited: true,
            wait: Some(Duration::from_secs(1)),
            error: "HTTP 429 fetching page 1".to_string(),
        });
        sink.record(FetchEvent::TotalPagesDiscovered { total_pages: 2 });
        sink.record(FetchEvent::FetchCompleted {
            pages: 2,
            records: 12,
        });
    }
}
