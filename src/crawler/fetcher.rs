//! Page fetching
//!
//! The engine consumes pages through the [`PageFetcher`] trait: give it a
//! URL, get back the page's outbound anchor links as absolute URLs. The
//! bundled [`HttpFetcher`] does a plain GET and pulls `a[href]` out of the
//! returned HTML; deployments that need JavaScript rendering can slot in a
//! headless-browser implementation behind the same trait.

use crate::url::canonicalize;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Browser-like user agent, matching what the pattern-discovery side of
/// the system presents to sites
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Errors from a single fetch operation
///
/// Every variant is recovered locally: the worker logs it, the URL stays
/// consumed from the budget, and the crawl continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("Navigation error: {0}")]
    Navigation(String),
}

/// Source of outbound links for a page
///
/// Implementations return the absolute URLs of the page's anchors at fetch
/// time. The engine makes no assumption about rendering technology.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its outbound anchor URLs
    async fn fetch(&self, url: &Url) -> Result<Vec<Url>, FetchError>;
}

/// Builds the HTTP client used by [`HttpFetcher`]
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP + HTML fetcher
///
/// Fetch flow: GET the URL, require an HTML content type, parse the body,
/// extract `a[href]`, resolve each href against the final response URL
/// (redirects may have moved the page). Unparsable hrefs are dropped
/// silently; they are accounted for by the caller's classification of the
/// links that do come back.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }

    /// Wraps an existing client, e.g. one with test-specific settings
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Url>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::Navigation(format!(
                "expected HTML, got '{}'",
                content_type
            )));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(classify_reqwest_error)?;

        Ok(extract_links(&body, &final_url))
    }
}

/// Extracts `a[href]` targets from an HTML document as absolute URLs
///
/// Relative hrefs are resolved against `base`. Hrefs that fail to parse or
/// carry a non-http(s) scheme are dropped.
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    // The selector literal is valid; parse() cannot fail on it
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| canonicalize(href, Some(base)).ok())
        .collect()
}

fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Network(format!("connection failed: {}", e))
    } else {
        FetchError::Network(e.to_string())
    }
}
