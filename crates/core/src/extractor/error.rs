//! Error types for the extractor module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the extractor.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Extractor binary not found.
    #[error("extractor not found at path: {path}")]
    NotFound { path: PathBuf },

    /// Options rejected at construction or unusable for the requested call.
    #[error("invalid extractor options: {reason}")]
    InvalidOptions { reason: String },

    /// Metadata could not be resolved for the URL.
    #[error("metadata extraction failed: {reason}")]
    ExtractionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Media download failed.
    #[error("download failed: {reason}")]
    DownloadFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The extractor did not finish in time.
    #[error("extractor timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse the extractor's metadata output.
    #[error("failed to parse metadata: {reason}")]
    ParseError { reason: String },

    /// I/O error while running the extractor.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractorError {
    /// Creates a new extraction failed error with stderr output.
    pub fn extraction_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new download failed error with stderr output.
    pub fn download_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::DownloadFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new invalid options error.
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            reason: reason.into(),
        }
    }
}
