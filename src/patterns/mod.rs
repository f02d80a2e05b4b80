//! Pattern store for per-domain product-URL patterns
//!
//! Patterns are produced by a separate discovery process and persisted as a
//! JSON object mapping domain to pattern string. The crawl reads exactly one
//! pattern, once, at startup; a missing pattern is a fatal precondition
//! failure rather than a per-page error.

mod store;

pub use store::{JsonPatternStore, PatternStore};
