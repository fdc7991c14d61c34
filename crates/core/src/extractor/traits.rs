//! Trait definitions for the extractor module.

use async_trait::async_trait;

use super::error::ExtractorError;
use super::types::{ExtractOptions, VideoMetadata};

/// An external tool that can resolve and download videos.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Checks that the extractor is usable and returns its version string.
    async fn validate(&self) -> Result<String, ExtractorError>;

    /// Resolves metadata for a URL without downloading any media.
    async fn extract_info(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<VideoMetadata, ExtractorError>;

    /// Downloads the media behind a URL into the options' output directory.
    ///
    /// Writes zero or one file. With `ignore_errors` set, a failure inside the
    /// extractor is not an error: it simply produces no file.
    async fn download(&self, url: &str, options: &ExtractOptions) -> Result<(), ExtractorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticExtractor;

    #[async_trait]
    impl Extractor for StaticExtractor {
        fn name(&self) -> &str {
            "static"
        }

        async fn validate(&self) -> Result<String, ExtractorError> {
            Ok("1.0".to_string())
        }

        async fn extract_info(
            &self,
            url: &str,
            _options: &ExtractOptions,
        ) -> Result<VideoMetadata, ExtractorError> {
            Ok(VideoMetadata {
                title: Some(url.to_string()),
                ..Default::default()
            })
        }

        async fn download(
            &self,
            _url: &str,
            options: &ExtractOptions,
        ) -> Result<(), ExtractorError> {
            let dir = options.output_dir().ok_or_else(|| {
                ExtractorError::invalid_options("download requires an output directory")
            })?;
            tokio::fs::write(dir.join("static.mp4"), b"data").await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_extract_info_via_trait_object() {
        let extractor: Box<dyn Extractor> = Box::new(StaticExtractor);
        let info = extractor
            .extract_info("https://example.com/v", &ExtractOptions::metadata_only())
            .await
            .unwrap();
        assert_eq!(info.title.as_deref(), Some("https://example.com/v"));
        assert_eq!(extractor.name(), "static");
    }

    #[tokio::test]
    async fn test_download_without_output_dir_fails() {
        let extractor = StaticExtractor;
        let result = extractor
            .download("https://example.com/v", &ExtractOptions::metadata_only())
            .await;
        assert!(matches!(result, Err(ExtractorError::InvalidOptions { .. })));
    }

    #[tokio::test]
    async fn test_download_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let options = ExtractOptions::for_download(dir.path(), Default::default()).unwrap();
        StaticExtractor
            .download("https://example.com/v", &options)
            .await
            .unwrap();
        assert!(dir.path().join("static.mp4").exists());
    }
}
