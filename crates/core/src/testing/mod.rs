//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the [`Extractor`] trait,
//! allowing the whole run lifecycle to be exercised without the network or a
//! yt-dlp installation.
//!
//! [`Extractor`]: crate::extractor::Extractor
//!
//! # Example
//!
//! ```rust,ignore
//! use tubecheck_core::testing::{fixtures, MockExtractor};
//!
//! let extractor = MockExtractor::new();
//! extractor.set_unreachable(fixtures::video_url("bbbbbbbbbbb")).await;
//!
//! let orchestrator = Orchestrator::initialize(fixtures::config(&urls, &urls, 0), extractor)?;
//! ```

mod mock_extractor;

pub use mock_extractor::{CallKind, MockDownload, MockExtractor, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use crate::orchestrator::OrchestratorConfig;

    /// Build a watch URL for a video id.
    pub fn video_url(id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", id)
    }

    /// Orchestrator config with the given URL lists and delay, creating the
    /// workspace in the system temp dir.
    pub fn config(
        probe_urls: &[String],
        download_urls: &[String],
        delay_secs: u64,
    ) -> OrchestratorConfig {
        OrchestratorConfig {
            probe_urls: probe_urls.to_vec(),
            download_urls: download_urls.to_vec(),
            inter_download_delay_secs: delay_secs,
            prefer_highest_quality: true,
            workspace_parent: None,
        }
    }

    /// Same as [`config`], but the workspace is created under `parent`.
    pub fn config_in(
        parent: &Path,
        probe_urls: &[String],
        download_urls: &[String],
        delay_secs: u64,
    ) -> OrchestratorConfig {
        OrchestratorConfig {
            workspace_parent: Some(parent.to_path_buf()),
            ..config(probe_urls, download_urls, delay_secs)
        }
    }

    /// Make `dir` read-only. Returns whether writes into it are now refused,
    /// which is not the case when running privileged.
    #[cfg(unix)]
    pub fn make_read_only(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        let _ = std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o555));
        let check = dir.join(".write-check");
        let refused = std::fs::write(&check, b"").is_err();
        let _ = std::fs::remove_file(&check);
        refused
    }

    /// Undo [`make_read_only`].
    #[cfg(unix)]
    pub fn make_writable(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;

        let _ = std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755));
    }
}
