use crate::PatternError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Source of per-domain product-URL patterns
///
/// A pattern is an opaque substring that marks a URL as a product-detail
/// page for one domain. The store is read once at crawl start.
pub trait PatternStore {
    /// Loads the pattern for a domain
    ///
    /// # Arguments
    ///
    /// * `domain` - The lowercase host the crawl is rooted at
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The pattern for this domain
    /// * `Err(PatternError::NotFound)` - No pattern stored for the domain
    fn load(&self, domain: &str) -> Result<String, PatternError>;
}

/// Pattern store backed by a JSON file
///
/// The file is a flat object keyed by domain:
///
/// ```json
/// { "shop.test": "/products/", "other.shop": "/item-" }
/// ```
///
/// Keys are written by the discovery process from the host of the URL it
/// was pointed at, so a store may hold `www.shop.test` while the crawl is
/// rooted at `shop.test`. Lookup therefore also tries the `www.`-stripped
/// and `www.`-prefixed variants of the requested domain.
pub struct JsonPatternStore {
    path: PathBuf,
}

impl JsonPatternStore {
    /// Creates a store reading from the given file path
    ///
    /// The file is not opened until `load` is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, PatternError> {
        let content = std::fs::read_to_string(&self.path)?;
        let patterns: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(patterns)
    }
}

impl PatternStore for JsonPatternStore {
    fn load(&self, domain: &str) -> Result<String, PatternError> {
        let patterns = self.read_all()?;

        let candidates = [
            domain.to_string(),
            format!("www.{}", domain),
            domain.strip_prefix("www.").unwrap_or(domain).to_string(),
        ];

        for key in &candidates {
            if let Some(pattern) = patterns.get(key) {
                tracing::info!(
                    "Loaded pattern '{}' for domain '{}' from {}",
                    pattern,
                    domain,
                    self.path.display()
                );
                return Ok(pattern.clone());
            }
        }

        Err(PatternError::NotFound {
            domain: domain.to_string(),
        })
    }
}
