//! Worker loop
//!
//! Each worker repeatedly reserves a URL from the frontier, fetches it,
//! and routes every discovered link: off-domain links are dropped, product
//! links go to the output sink, everything else is offered back to the
//! frontier. A worker only exits on a `Drained` verdict; fetch failures
//! never abort the crawl.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{Dequeue, Frontier};
use crate::output::{CrawlStats, OutputSink};
use crate::url::{canonicalize, classify, same_domain, Classification};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// How long a worker sleeps when the frontier is empty but fetches are
/// still in flight
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// One unit of the crawl's worker pool
pub struct Worker {
    id: usize,
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn OutputSink>,
    stats: Arc<CrawlStats>,
    domain: String,
    pattern: String,
}

impl Worker {
    pub fn new(
        id: usize,
        frontier: Arc<Frontier>,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn OutputSink>,
        stats: Arc<CrawlStats>,
        domain: String,
        pattern: String,
    ) -> Self {
        Self {
            id,
            frontier,
            fetcher,
            sink,
            stats,
            domain,
            pattern,
        }
    }

    /// Runs until the frontier reports `Drained`
    ///
    /// On `Pending` the worker sleeps briefly and rechecks; the verdict can
    /// flip either way while fetches are outstanding, so polling is the
    /// whole coordination story here.
    pub async fn run(self) {
        loop {
            match self.frontier.begin_fetch() {
                Dequeue::Url(url) => {
                    self.process_page(&url).await;
                    self.frontier.finish_fetch();
                }
                Dequeue::Pending => {
                    tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
                }
                Dequeue::Drained => {
                    tracing::debug!("Worker {} exiting: frontier drained", self.id);
                    break;
                }
            }
        }
    }

    /// Fetches one page and routes its links
    async fn process_page(&self, url: &Url) {
        tracing::info!(
            "Crawling ({} budget left): {}",
            self.frontier.budget_remaining(),
            url
        );
        self.stats.record_page_crawled();

        let links = match self.fetcher.fetch(url).await {
            Ok(links) => links,
            Err(e) => {
                // The URL stays visited and the budget slot stays spent;
                // there is no retry path.
                tracing::warn!("Fetch failed for {}: {}", url, e);
                self.stats.record_page_failed();
                return;
            }
        };

        self.stats.record_links_discovered(links.len() as u64);

        for link in &links {
            self.handle_link(link, url).await;
        }
    }

    /// Classifies and routes a single discovered link
    async fn handle_link(&self, link: &Url, page: &Url) {
        // Fetchers return absolute URLs, but re-canonicalizing is cheap and
        // lets scripted test fetchers hand back raw strings via Url::parse.
        let link = match canonicalize(link.as_str(), Some(page)) {
            Ok(l) => l,
            Err(e) => {
                tracing::debug!("Discarding malformed link on {}: {}", page, e);
                return;
            }
        };

        if !same_domain(&link, &self.domain) {
            tracing::trace!("Discarding off-domain link {}", link);
            return;
        }

        match classify(&link, &self.pattern) {
            Classification::Product => {
                // Appended at discovery time, without consulting the
                // visited set; concurrent discovery of the same product
                // link can produce a duplicate record, which downstream
                // consumers filter.
                if let Err(e) = self.sink.append(&self.domain, &link).await {
                    tracing::warn!("Failed to record product URL {}: {}", link, e);
                } else {
                    self.stats.record_product_found();
                    tracing::debug!("Product URL: {}", link);
                }
            }
            Classification::NonProduct => {
                if self.frontier.try_admit(&link) {
                    tracing::trace!("Admitted {}", link);
                }
            }
        }
    }
}
