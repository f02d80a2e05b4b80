use crate::UrlError;
use url::Url;

/// Canonicalizes a raw href into an absolute URL
///
/// # Canonicalization Steps
///
/// 1. Parse the href; relative hrefs are resolved against `base` when one
///    is provided, otherwise rejected
/// 2. Require an http or https scheme (mailto:, javascript:, etc. are
///    discarded by callers via the error)
/// 3. Require a host component
/// 4. Strip the fragment
///
/// Two URLs differing only by fragment canonicalize to the same value and
/// are treated as the same page. Path and query are left untouched: the
/// product pattern matches against them verbatim, so rewriting either
/// would change classification results.
///
/// # Arguments
///
/// * `raw` - The href string, absolute or relative
/// * `base` - The URL of the page the href was found on, if any
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shelfmap::url::canonicalize;
///
/// let base = Url::parse("https://shop.test/catalog/").unwrap();
/// let url = canonicalize("../products/1#reviews", Some(&base)).unwrap();
/// assert_eq!(url.as_str(), "https://shop.test/products/1");
/// ```
pub fn canonicalize(raw: &str, base: Option<&Url>) -> Result<Url, UrlError> {
    let mut url = match base {
        Some(base) => base
            .join(raw)
            .map_err(|e| UrlError::Parse(e.to_string()))?,
        None => Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
