use crate::output::traits::{OutputSink, SinkError, SinkResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use url::Url;

/// Line-oriented file sink
///
/// Appends `{domain},{url}\n` records, UTF-8, one line per call. The file
/// handle lives behind an async mutex and each record goes out as a single
/// `write_all`, so concurrent appends cannot interleave. Commas inside URLs
/// are not escaped; the consumer splits on the first comma only.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Opens the sink in append mode, creating the file if needed
    pub async fn open<P: AsRef<Path>>(path: P) -> SinkResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await
            .map_err(|e| SinkError::Open(format!("{}: {}", path.as_ref().display(), e)))?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn append(&self, domain: &str, url: &Url) -> SinkResult<()> {
        let line = format!("{},{}\n", domain, url);
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
