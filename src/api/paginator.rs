//! Pagination coordinator: drives the page client across all pages.
//!
//! Page 1 is fetched first to discover the total page count; remaining pages
//! follow sequentially. The aggregation buffer is owned exclusively here and
//! appended to only after each page completes, so records arrive in page
//! order, then within-page order. A page that exhausts its retries aborts
//! the whole operation — partial results are discarded, because a caller
//! that does not know which pages are missing cannot trust totals.

use tokio_util::sync::CancellationToken;

use super::client::PageClient;
use super::error::FetchError;
use super::events::FetchEvent;
use crate::model::RawCustomer;

/// Fetches every page and returns all raw records in page order.
///
/// Repeated calls re-fetch; there is no caching.
///
/// # Errors
///
/// Propagates the first [`FetchError`] from any page: exhausted retries,
/// a non-retriable status, a malformed body, or cancellation. No partial
/// record set is ever returned.
pub async fn fetch_all(
    client: &PageClient,
    cancel: &CancellationToken,
) -> Result<Vec<RawCustomer>, FetchError> {
    let sink = client.event_sink();

    let first = client.fetch_page(1, cancel).await?;
    let total_pages = first.total_pages;
    sink.record(FetchEvent::TotalPagesDiscovered { total_pages });

    let mut records = first.data;
    for page in 2..=total_pages {
        let body = client.fetch_page(page, cancel).await?;
        records.extend(body.data);
    }

    sink.record(FetchEvent::FetchCompleted {
        pages: total_pages,
        records: records.len(),
    });
    Ok(records)
}
