//! Crawl configuration
//!
//! Parameters arrive from the CLI rather than a config file; this module
//! holds the validated form the engine consumes.

mod types;
mod validation;

pub use types::CrawlConfig;
pub use validation::validate;
