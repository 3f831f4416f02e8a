//! Page-by-page search driver.
//!
//! One pass walks `start_page..=max_page`, loading each results page,
//! extracting every organic card, and stopping at the first page with no
//! cards, the page limit, a cancellation, or the first page that fails to
//! load. Records from earlier pages are always returned. The browsing session
//! is closed exactly once when the pass ends, whichever way it ends.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use ypscrape_core::{ListingRecord, RunResult, SearchRequest, StopReason};

use crate::browse::BrowsingSession;
use crate::error::ScraperError;
use crate::extract::{extract_listing, selectors};
use crate::search_url::search_url;

/// Wait after each navigation for client-side rendering to settle.
pub const SETTLE_DELAY: Duration = Duration::from_secs(6);

pub struct PaginationDriver<S> {
    session: S,
    base_url: String,
    cancel: CancellationToken,
}

impl<S: BrowsingSession> PaginationDriver<S> {
    /// Takes exclusive ownership of `session` for one run.
    pub fn new(session: S, base_url: impl Into<String>) -> Self {
        Self {
            session,
            base_url: base_url.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Checks `cancel` before every page fetch.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs one forward pass over the request's page range and releases the
    /// session.
    pub async fn run(mut self, request: &SearchRequest) -> RunResult {
        let mut records = Vec::new();
        let mut pages_scraped = 0u32;

        let stop = self
            .paginate(request, &mut records, &mut pages_scraped)
            .await;

        if let Err(e) = self.session.close().await {
            tracing::warn!(error = %e, "failed to release browsing session");
        }

        tracing::info!(
            records = records.len(),
            pages = pages_scraped,
            stop = %stop,
            "pagination finished"
        );

        RunResult {
            records,
            pages_scraped,
            stop,
        }
    }

    async fn paginate(
        &mut self,
        request: &SearchRequest,
        records: &mut Vec<ListingRecord>,
        pages_scraped: &mut u32,
    ) -> StopReason {
        let mut page = request.start_page();

        loop {
            if page > request.max_page() {
                return StopReason::PageLimit;
            }
            if self.cancel.is_cancelled() {
                tracing::info!(page, "run cancelled");
                return StopReason::Cancelled { next_page: page };
            }

            match self.scrape_page(request, page, records).await {
                Ok(0) => {
                    tracing::info!(page, "no more cards found");
                    return StopReason::Exhausted { page };
                }
                Ok(cards) => {
                    *pages_scraped += 1;
                    tracing::info!(page, cards, "page scraped");
                }
                Err(e) => {
                    tracing::error!(page, error = %e, "page failed; ending run");
                    return StopReason::PageFailed {
                        page,
                        error: e.to_string(),
                    };
                }
            }

            page = match page.checked_add(1) {
                Some(next) => next,
                None => return StopReason::PageLimit,
            };
        }
    }

    /// Loads one results page and appends its cards' records. Returns the
    /// number of cards found.
    async fn scrape_page(
        &mut self,
        request: &SearchRequest,
        page: u32,
        records: &mut Vec<ListingRecord>,
    ) -> Result<usize, ScraperError> {
        let url = search_url(&self.base_url, request, page);
        tracing::debug!(page, url = %url, "fetching results page");

        self.session.navigate(&url).await?;
        tokio::time::sleep(SETTLE_DELAY).await;

        let cards = self.session.find_all(selectors::CARD).await?;
        for (index, card) in cards.iter().enumerate() {
            let record = extract_listing(card).await;
            if record.is_blank() {
                tracing::debug!(page, card = index, "card yielded no fields");
            }
            records.push(record);
        }

        Ok(cards.len())
    }
}
