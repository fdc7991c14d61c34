//! Mock extractor for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::extractor::{ExtractOptions, Extractor, ExtractorError, VideoMetadata};

/// Which extractor entry point a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Info,
    Download,
}

/// A recorded extractor call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub url: String,
    pub options: ExtractOptions,
}

/// What a mocked download does for a given URL.
#[derive(Debug, Clone)]
pub enum MockDownload {
    /// Write a file with the given name and size into the output directory.
    WriteFile { file_name: String, size_bytes: usize },
    /// Report success without writing anything.
    NoFile,
    /// Fail with a download error.
    Fail { reason: String },
    /// Leave a partially written file behind, then fail.
    Partial { file_name: String, reason: String },
}

/// Mock implementation of the Extractor trait.
///
/// Provides controllable behavior for testing:
/// - Mark URLs unreachable (metadata extraction fails)
/// - Choose per-URL download behavior (file, no file, failure)
/// - Track every call for assertions
/// - Simulate slow calls
///
/// # Example
///
/// ```rust,ignore
/// use tubecheck_core::testing::{MockDownload, MockExtractor};
///
/// let extractor = MockExtractor::new();
/// extractor.set_unreachable("https://www.youtube.com/watch?v=bbbbbbbbbbb").await;
/// extractor.set_download("https://www.youtube.com/watch?v=aaaaaaaaaaa", MockDownload::NoFile).await;
///
/// // ... run the orchestrator ...
///
/// assert_eq!(extractor.info_count().await, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockExtractor {
    /// Recorded calls, in order.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// URLs for which metadata extraction fails.
    unreachable: Arc<RwLock<HashSet<String>>>,
    /// Pre-configured metadata by URL.
    metadata: Arc<RwLock<HashMap<String, VideoMetadata>>>,
    /// Pre-configured download behavior by URL.
    downloads: Arc<RwLock<HashMap<String, MockDownload>>>,
    /// If set, validate() fails with this error.
    validate_error: Arc<RwLock<Option<ExtractorError>>>,
    /// Simulated duration of every call.
    call_duration: Arc<RwLock<Duration>>,
}

impl MockExtractor {
    /// Create a new mock extractor where every URL is reachable and
    /// downloadable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// URLs passed to `extract_info`, in call order.
    pub async fn info_urls(&self) -> Vec<String> {
        self.urls_of(CallKind::Info).await
    }

    /// URLs passed to `download`, in call order.
    pub async fn download_urls(&self) -> Vec<String> {
        self.urls_of(CallKind::Download).await
    }

    /// Number of `extract_info` calls.
    pub async fn info_count(&self) -> usize {
        self.info_urls().await.len()
    }

    /// Number of `download` calls.
    pub async fn download_count(&self) -> usize {
        self.download_urls().await.len()
    }

    /// Make metadata extraction fail for a URL.
    pub async fn set_unreachable(&self, url: impl Into<String>) {
        self.unreachable.write().await.insert(url.into());
    }

    /// Set the metadata returned for a URL.
    pub async fn set_metadata(&self, url: impl Into<String>, metadata: VideoMetadata) {
        self.metadata.write().await.insert(url.into(), metadata);
    }

    /// Set the download behavior for a URL.
    pub async fn set_download(&self, url: impl Into<String>, behavior: MockDownload) {
        self.downloads.write().await.insert(url.into(), behavior);
    }

    /// Make the next validate() call fail.
    pub async fn set_validate_error(&self, error: ExtractorError) {
        *self.validate_error.write().await = Some(error);
    }

    /// Set the simulated duration of every call.
    pub async fn set_call_duration(&self, duration: Duration) {
        *self.call_duration.write().await = duration;
    }

    async fn urls_of(&self, kind: CallKind) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.url.clone())
            .collect()
    }

    async fn record(&self, kind: CallKind, url: &str, options: &ExtractOptions) {
        self.calls.write().await.push(RecordedCall {
            kind,
            url: url.to_string(),
            options: options.clone(),
        });
    }

    async fn simulate_work(&self) {
        let duration = *self.call_duration.read().await;
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Default metadata for URLs without a configured entry.
    fn default_metadata(url: &str) -> VideoMetadata {
        let id = url.rsplit('=').next().unwrap_or(url);
        VideoMetadata {
            title: Some(format!("Test video {}", id)),
            duration: Some(212.0),
            uploader: Some("mock-uploader".to_string()),
            view_count: Some(1_000),
        }
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate(&self) -> Result<String, ExtractorError> {
        if let Some(err) = self.validate_error.write().await.take() {
            return Err(err);
        }
        Ok("mock-1.0".to_string())
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<VideoMetadata, ExtractorError> {
        self.record(CallKind::Info, url, options).await;
        self.simulate_work().await;

        if self.unreachable.read().await.contains(url) {
            return Err(ExtractorError::extraction_failed(
                format!("unable to reach {}", url),
                None,
            ));
        }

        if let Some(metadata) = self.metadata.read().await.get(url) {
            return Ok(metadata.clone());
        }

        Ok(Self::default_metadata(url))
    }

    async fn download(&self, url: &str, options: &ExtractOptions) -> Result<(), ExtractorError> {
        self.record(CallKind::Download, url, options).await;
        self.simulate_work().await;

        let dir = options.output_dir().ok_or_else(|| {
            ExtractorError::invalid_options("download requires an output directory")
        })?;

        let behavior = self.downloads.read().await.get(url).cloned();
        match behavior {
            Some(MockDownload::NoFile) => Ok(()),
            Some(MockDownload::Fail { reason }) => {
                Err(ExtractorError::download_failed(reason, None))
            }
            Some(MockDownload::Partial { file_name, reason }) => {
                tokio::fs::write(dir.join(file_name), b"partial").await?;
                Err(ExtractorError::download_failed(reason, None))
            }
            Some(MockDownload::WriteFile {
                file_name,
                size_bytes,
            }) => {
                tokio::fs::write(dir.join(file_name), vec![0u8; size_bytes]).await?;
                Ok(())
            }
            None => {
                let title = Self::default_metadata(url).title_or_unknown();
                tokio::fs::write(dir.join(format!("{}.mp4", title)), vec![0u8; 1024]).await?;
                Ok(())
            }
        }
    }
}
