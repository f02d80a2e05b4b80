//! Crawl counters and end-of-run reporting
//!
//! Workers bump these counters as they go; the coordinator snapshots them
//! for the final report. Counters are advisory and deliberately outside the
//! frontier's lock, so momentary reads during a crawl may trail the queue
//! state by a page or two.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for a single crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_crawled: AtomicU64,
    pages_failed: AtomicU64,
    links_discovered: AtomicU64,
    products_found: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_crawled(&self) {
        self.pages_crawled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_links_discovered(&self, count: u64) {
        self.links_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_product_found(&self) {
        self.products_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Pages dequeued for fetch, successful or not
    pub fn pages_crawled(&self) -> u64 {
        self.pages_crawled.load(Ordering::Relaxed)
    }

    /// Pages whose fetch failed (still counted in `pages_crawled`)
    pub fn pages_failed(&self) -> u64 {
        self.pages_failed.load(Ordering::Relaxed)
    }

    /// Raw anchor count returned by fetches, before any filtering
    pub fn links_discovered(&self) -> u64 {
        self.links_discovered.load(Ordering::Relaxed)
    }

    /// Records appended to the output sink
    pub fn products_found(&self) -> u64 {
        self.products_found.load(Ordering::Relaxed)
    }
}

impl std::fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages crawled ({} failed), {} links seen, {} products found",
            self.pages_crawled(),
            self.pages_failed(),
            self.links_discovered(),
            self.products_found()
        )
    }
}
