//! Output handling for discovered product URLs
//!
//! The crawl's only durable output is an append-only stream of
//! `{domain},{url}` records. The sink trait keeps file mechanics out of the
//! engine; the bundled implementations are a line-oriented file sink and an
//! in-memory sink for tests.

mod file;
mod stats;
mod traits;

pub use file::FileSink;
pub use stats::CrawlStats;
pub use traits::{MemorySink, OutputSink, SinkError};
