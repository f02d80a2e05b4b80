//! Output sink trait and types
//!
//! A sink receives one record per product URL discovered. Implementations
//! must guarantee that concurrent appends never interleave partial records.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that can occur during sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open output: {0}")]
    Open(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Append-only destination for confirmed product URLs
///
/// Each call appends exactly one `{domain},{url}` record. The record is
/// written atomically with respect to other concurrent appends, but no
/// ordering across workers is guaranteed, and the sink never deduplicates:
/// the rare duplicate produced when two workers discover the same product
/// link concurrently is passed through for downstream filtering.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Appends a single product record
    async fn append(&self, domain: &str, url: &Url) -> SinkResult<()>;
}

/// In-memory sink collecting records for inspection
///
/// Used by tests and available to embedders that post-process results
/// instead of writing a file.
#[derive(Default)]
pub struct MemorySink {
    records: std::sync::Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records appended so far
    pub fn records(&self) -> Vec<String> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn append(&self, domain: &str, url: &Url) -> SinkResult<()> {
        let mut records = self.records.lock().unwrap();
        records.push(format!("{},{}", domain, url));
        Ok(())
    }
}
