use std::path::PathBuf;

/// Validated parameters for one crawl run
///
/// The engine receives these already validated; `validate()` is the CLI's
/// responsibility before handing the config over.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from; its host becomes the crawl's domain
    pub start_url: String,

    /// Maximum number of pages to fetch
    pub max_pages: u64,

    /// Number of concurrent workers (one worker maps to one page fetch at
    /// a time)
    pub max_concurrent: usize,

    /// Path to the JSON pattern store
    pub patterns_file: PathBuf,

    /// Path of the append-only product URL file
    pub output_path: PathBuf,
}
