//! Configuration for the extractor module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the yt-dlp based extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Path to the yt-dlp binary.
    #[serde(default = "default_binary_path")]
    pub binary_path: PathBuf,

    /// Upper bound for a single extractor invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Additional arguments passed to every invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_binary_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_timeout() -> u64 {
    600 // 10 minutes
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            timeout_secs: default_timeout(),
            extra_args: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Creates a config pointing at a specific binary.
    pub fn with_binary(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            ..Default::default()
        }
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
