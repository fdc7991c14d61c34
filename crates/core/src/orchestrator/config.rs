//! Orchestrator configuration.

use std::path::PathBuf;

use crate::config::Config;

/// Configuration for a single orchestrated run.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// URLs probed in order until one is reachable.
    pub probe_urls: Vec<String>,

    /// URLs downloaded one after another once connectivity is confirmed.
    pub download_urls: Vec<String>,

    /// Pause between two consecutive downloads (seconds).
    pub inter_download_delay_secs: u64,

    /// Request the best rendition instead of the worst.
    pub prefer_highest_quality: bool,

    /// Where the workspace is created. `None` means the system temp dir.
    pub workspace_parent: Option<PathBuf>,
}

impl From<&Config> for OrchestratorConfig {
    fn from(config: &Config) -> Self {
        Self {
            probe_urls: config.probe.urls.clone(),
            download_urls: config.download.urls.clone(),
            inter_download_delay_secs: config.download.inter_download_delay_secs,
            prefer_highest_quality: config.download.quality == crate::extractor::Quality::Best,
            workspace_parent: config.workspace.parent_dir.clone(),
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.probe_urls.len(), 2);
        assert_eq!(config.download_urls.len(), 2);
        assert_eq!(config.inter_download_delay_secs, 10);
        assert!(config.prefer_highest_quality);
        assert!(config.workspace_parent.is_none());
    }

    #[test]
    fn test_from_loaded_config() {
        let toml = r#"
[download]
urls = ["https://www.youtube.com/watch?v=aaaaaaaaaaa"]
inter_download_delay_secs = 1
quality = "worst"

[workspace]
parent_dir = "/data/scratch"
"#;
        let config = OrchestratorConfig::from(&load_config_from_str(toml).unwrap());
        assert_eq!(config.download_urls.len(), 1);
        assert_eq!(config.inter_download_delay_secs, 1);
        assert!(!config.prefer_highest_quality);
        assert_eq!(config.workspace_parent, Some(PathBuf::from("/data/scratch")));
    }
}
