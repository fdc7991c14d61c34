use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extractor::{ExtractorConfig, Quality};

/// Videos used both for the reachability probe and the download run.
pub const DEFAULT_TEST_URLS: [&str; 2] = [
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "https://www.youtube.com/watch?v=jNQXAC9IVRw",
];

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Connectivity probe configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// URLs tried in order; the first reachable one ends the probe.
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
        }
    }
}

/// Sequential download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
    /// Pause between two consecutive downloads (never after the last one).
    #[serde(default = "default_delay")]
    pub inter_download_delay_secs: u64,
    #[serde(default)]
    pub quality: Quality,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            inter_download_delay_secs: default_delay(),
            quality: Quality::default(),
        }
    }
}

/// Temporary workspace configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Directory the workspace is created in. Defaults to the system temp dir.
    #[serde(default)]
    pub parent_dir: Option<PathBuf>,
}

fn default_urls() -> Vec<String> {
    DEFAULT_TEST_URLS.iter().map(|u| u.to_string()).collect()
}

fn default_delay() -> u64 {
    10
}
