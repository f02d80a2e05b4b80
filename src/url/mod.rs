//! URL handling module for shelfmap
//!
//! This module provides URL canonicalization, domain extraction, same-domain
//! checks, and product classification against a per-domain pattern.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::canonicalize;

/// Classification of a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Link matches the domain's product-URL pattern
    Product,
    /// Any other same-domain link; a candidate for further crawling
    NonProduct,
}

impl Classification {
    /// Returns true if the link should be appended to the output sink
    pub fn is_product(&self) -> bool {
        matches!(self, Self::Product)
    }
}

/// Classifies a URL against a product-URL pattern
///
/// Returns `Product` if `pattern` occurs as a contiguous substring of the
/// URL's path+query. The match is case-sensitive and the pattern is used
/// verbatim; this deliberately naive policy mirrors the pattern-discovery
/// side of the system and is a known precision limitation.
///
/// This is a pure function: the same inputs always produce the same result.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shelfmap::url::{classify, Classification};
///
/// let url = Url::parse("https://shop.test/products/42").unwrap();
/// assert_eq!(classify(&url, "/products/"), Classification::Product);
///
/// let url = Url::parse("https://shop.test/about").unwrap();
/// assert_eq!(classify(&url, "/products/"), Classification::NonProduct);
/// ```
pub fn classify(url: &url::Url, pattern: &str) -> Classification {
    let haystack = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };

    if haystack.contains(pattern) {
        Classification::Product
    } else {
        Classification::NonProduct
    }
}
