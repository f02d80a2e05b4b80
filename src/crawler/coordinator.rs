//! Crawl coordination
//!
//! The coordinator owns the shared crawl state, seeds the frontier, runs
//! the worker pool, and reports the outcome. Startup is the only place a
//! crawl can fail: once workers are running, every per-page error is
//! swallowed at the worker and the crawl succeeds whenever it terminates.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::worker::Worker;
use crate::output::{CrawlStats, FileSink, OutputSink};
use crate::patterns::{JsonPatternStore, PatternStore};
use crate::url::{canonicalize, extract_domain};
use crate::{ShelfError, UrlError};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler structure
///
/// Holds everything the worker pool shares: the frontier (queue + visited
/// set + budget), the fetcher and sink seams, and the run counters.
pub struct Crawler {
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn OutputSink>,
    stats: Arc<CrawlStats>,
    seed: Url,
    domain: String,
    pattern: String,
    max_concurrent: usize,
}

impl Crawler {
    /// Creates a crawler from validated parameters
    ///
    /// The pattern must already be resolved for the seed's domain; loading
    /// it (and failing fast when it is missing) is the caller's startup
    /// step, see [`run_crawl`].
    pub fn new(
        config: &CrawlConfig,
        pattern: String,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self, ShelfError> {
        let seed = canonicalize(&config.start_url, None)?;
        let domain = extract_domain(&seed).ok_or(UrlError::MissingHost)?;

        Ok(Self {
            frontier: Arc::new(Frontier::new(config.max_pages)),
            fetcher,
            sink,
            stats: Arc::new(CrawlStats::new()),
            seed,
            domain,
            pattern,
            max_concurrent: config.max_concurrent,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Seeds the frontier, launches `max_concurrent` workers, and waits for
    /// every worker to observe the drained frontier. Termination is decided
    /// inside the frontier: workers exit only when no URL is queued, no
    /// fetch is outstanding, or the page budget is spent with all in-flight
    /// fetches completed.
    pub async fn run(&self) -> crate::Result<()> {
        tracing::info!(
            "Starting crawl of {} (domain {}, pattern '{}', budget {}, {} workers)",
            self.seed,
            self.domain,
            self.pattern,
            self.frontier.budget_remaining(),
            self.max_concurrent
        );

        let start_time = std::time::Instant::now();
        self.frontier.try_admit(&self.seed);

        let mut workers = JoinSet::new();
        for id in 0..self.max_concurrent {
            let worker = Worker::new(
                id,
                Arc::clone(&self.frontier),
                Arc::clone(&self.fetcher),
                Arc::clone(&self.sink),
                Arc::clone(&self.stats),
                self.domain.clone(),
                self.pattern.clone(),
            );
            workers.spawn(worker.run());
        }

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                // A worker panicked; the rest keep draining the frontier
                tracing::error!("Worker task failed: {}", e);
            }
        }

        let leftover = self.frontier.queued_len();
        if leftover > 0 {
            tracing::info!(
                "Page budget exhausted with {} URLs still queued",
                leftover
            );
        }
        tracing::info!(
            "Crawl complete in {:?}: {}",
            start_time.elapsed(),
            self.stats
        );

        Ok(())
    }

    /// Run counters, live during the crawl and final afterwards
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// The shared frontier, mainly for post-run inspection
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The crawl's root domain
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Runs a complete crawl with the default collaborators
///
/// Startup sequence, any step of which fails the crawl before it begins:
///
/// 1. Canonicalize the seed URL and extract the root domain
/// 2. Load the domain's product pattern from the JSON pattern store
/// 3. Open the output file in append mode
/// 4. Build the HTTP fetcher
///
/// # Arguments
///
/// * `config` - Validated crawl parameters
///
/// # Returns
///
/// * `Ok(())` - The crawl terminated (individual fetch failures included)
/// * `Err(ShelfError)` - A startup precondition failed
pub async fn run_crawl(config: &CrawlConfig) -> crate::Result<()> {
    let seed = canonicalize(&config.start_url, None)?;
    let domain = extract_domain(&seed).ok_or(UrlError::MissingHost)?;

    let store = JsonPatternStore::new(&config.patterns_file);
    let pattern = store.load(&domain)?;

    let sink = Arc::new(FileSink::open(&config.output_path).await?);
    let fetcher = Arc::new(HttpFetcher::new()?);

    let crawler = Crawler::new(config, pattern, fetcher, sink)?;
    crawler.run().await?;

    tracing::info!(
        "Results saved to {}",
        config.output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::FetchError;
    use crate::output::MemorySink;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct GraphFetcher {
        pages: HashMap<String, Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for GraphFetcher {
        async fn fetch(&self, url: &Url) -> Result<Vec<Url>, FetchError> {
            let links = self
                .pages
                .get(url.path())
                .ok_or_else(|| FetchError::Http(404))?;
            Ok(links.iter().filter_map(|l| url.join(l).ok()).collect())
        }
    }

    fn graph(pages: &[(&str, &[&str])]) -> Arc<GraphFetcher> {
        Arc::new(GraphFetcher {
            pages: pages
                .iter()
                .map(|(path, links)| {
                    (
                        path.to_string(),
                        links.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect(),
        })
    }

    fn config(max_pages: u64, max_concurrent: usize) -> CrawlConfig {
        CrawlConfig {
            start_url: "https://shop.test/".to_string(),
            max_pages,
            max_concurrent,
            patterns_file: "patterns.json".into(),
            output_path: "product_urls.txt".into(),
        }
    }

    #[tokio::test]
    async fn test_crawl_wide_graph_with_pool() {
        // Seed links to 20 category pages, each holding one product
        let mut pages: Vec<(String, Vec<String>)> = Vec::new();
        let seed_links: Vec<String> = (0..20).map(|i| format!("/cat/{}", i)).collect();
        pages.push(("/".to_string(), seed_links));
        for i in 0..20 {
            pages.push((format!("/cat/{}", i), vec![format!("/products/{}", i)]));
        }
        let fetcher = Arc::new(GraphFetcher {
            pages: pages.into_iter().collect(),
        });

        let sink = Arc::new(MemorySink::new());
        let crawler = Crawler::new(
            &config(100, 5),
            "/products/".to_string(),
            fetcher,
            Arc::clone(&sink) as Arc<dyn OutputSink>,
        )
        .unwrap();

        crawler.run().await.unwrap();

        let mut records = sink.records();
        records.sort();
        assert_eq!(records.len(), 20);
        assert_eq!(crawler.stats().pages_crawled(), 21);
        assert_eq!(crawler.frontier().in_flight(), 0);
        assert_eq!(crawler.frontier().queued_len(), 0);
    }

    #[tokio::test]
    async fn test_crawl_terminates_on_cycle_with_pool() {
        let fetcher = graph(&[("/a", &["/b"]), ("/b", &["/a"]), ("/", &["/a"])]);
        let sink = Arc::new(MemorySink::new());
        let crawler = Crawler::new(
            &config(50, 4),
            "/products/".to_string(),
            fetcher,
            Arc::clone(&sink) as Arc<dyn OutputSink>,
        )
        .unwrap();

        crawler.run().await.unwrap();

        assert_eq!(crawler.stats().pages_crawled(), 3);
        assert_eq!(crawler.frontier().queued_len(), 0);
    }

    #[tokio::test]
    async fn test_budget_caps_pool_dequeues() {
        // Every page links onward forever; only the budget stops the crawl
        let mut pages: Vec<(String, Vec<String>)> = vec![(
            "/".to_string(),
            (0..10).map(|i| format!("/p{}", i)).collect(),
        )];
        for i in 0..10 {
            pages.push((
                format!("/p{}", i),
                (0..10).map(|j| format!("/p{}-{}", i, j)).collect(),
            ));
            for j in 0..10 {
                pages.push((format!("/p{}-{}", i, j), vec!["/".to_string()]));
            }
        }
        let fetcher = Arc::new(GraphFetcher {
            pages: pages.into_iter().collect(),
        });

        let sink = Arc::new(MemorySink::new());
        let crawler = Crawler::new(
            &config(7, 3),
            "/products/".to_string(),
            fetcher,
            Arc::clone(&sink) as Arc<dyn OutputSink>,
        )
        .unwrap();

        crawler.run().await.unwrap();

        assert_eq!(crawler.stats().pages_crawled(), 7);
        assert_eq!(crawler.frontier().budget_remaining(), 0);
        assert_eq!(crawler.frontier().in_flight(), 0);
    }

    #[tokio::test]
    async fn test_invalid_seed_rejected() {
        let fetcher = graph(&[]);
        let sink = Arc::new(MemorySink::new());
        let mut cfg = config(10, 2);
        cfg.start_url = "not a url".to_string();

        let result = Crawler::new(
            &cfg,
            "/products/".to_string(),
            fetcher,
            sink as Arc<dyn OutputSink>,
        );
        assert!(result.is_err());
    }
}
