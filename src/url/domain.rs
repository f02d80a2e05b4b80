use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or None for URLs without
/// a host (which canonicalization already rejects).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shelfmap::url::extract_domain;
///
/// let url = Url::parse("https://Shop.Test/products/1").unwrap();
/// assert_eq!(extract_domain(&url), Some("shop.test".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the crawl's root domain
///
/// The host must equal `root` exactly, with one concession: a single `www.`
/// prefix on either side is ignored, so a crawl rooted at `shop.test`
/// follows links to `www.shop.test` and vice versa. No other subdomain
/// equivalence applies.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shelfmap::url::same_domain;
///
/// let url = Url::parse("https://www.shop.test/products/1").unwrap();
/// assert!(same_domain(&url, "shop.test"));
///
/// let url = Url::parse("https://cdn.shop.test/img.png").unwrap();
/// assert!(!same_domain(&url, "shop.test"));
/// ```
pub fn same_domain(url: &Url, root: &str) -> bool {
    let host = match url.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    host == root
        || host == format!("www.{}", root)
        || format!("www.{}", host) == root
}
