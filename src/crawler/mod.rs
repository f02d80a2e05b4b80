//! Crawl engine
//!
//! This module contains the core crawling logic:
//! - Frontier queue with visited-set dedup and page-budget enforcement
//! - Page fetching behind the `PageFetcher` seam
//! - Worker loop for fetch/classify/route
//! - Coordination of the worker pool and crawl termination

mod coordinator;
mod fetcher;
mod frontier;
mod worker;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, extract_links, FetchError, HttpFetcher, PageFetcher};
pub use frontier::{Dequeue, Frontier};
pub use worker::Worker;
