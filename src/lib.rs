//! Shelfmap: product-URL discovery for e-commerce sites
//!
//! This crate implements a bounded-concurrency crawler that walks a site's
//! link graph breadth-first from a seed URL, stays on the seed's domain, and
//! records every link matching the site's product-URL pattern.

pub mod config;
pub mod crawler;
pub mod output;
pub mod patterns;
pub mod url;

use thiserror::Error;

/// Main error type for shelfmap operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pattern store error: {0}")]
    Pattern(#[from] PatternError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output sink error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from the pattern store
///
/// `NotFound` is the crawl's only fatal precondition besides an unparsable
/// seed URL: without a pattern no link can ever classify as a product.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("No pattern stored for domain '{domain}' (run pattern discovery first)")]
    NotFound { domain: String },

    #[error("Failed to read pattern store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse pattern store: {0}")]
    Parse(#[from] serde_json::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for shelfmap operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{Crawler, FetchError, Frontier, PageFetcher};
pub use output::{CrawlStats, OutputSink};
pub use patterns::{JsonPatternStore, PatternStore};
pub use url::{canonicalize, classify, extract_domain, same_domain, Classification};
