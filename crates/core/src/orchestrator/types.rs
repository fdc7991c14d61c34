//! Types for the run orchestrator.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::extractor::{ExtractorError, VideoMetadata};
use crate::workspace::{Artifact, WorkspaceError};

/// Errors that abort a run before it starts.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The workspace could not be created.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
}

/// Why a single download produced no artifact.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Download options could not be built for the workspace.
    #[error("invalid download options: {0}")]
    Options(ExtractorError),

    /// Metadata request failed.
    #[error("metadata request failed: {0}")]
    Metadata(ExtractorError),

    /// Download request failed.
    #[error("download request failed: {0}")]
    Download(ExtractorError),

    /// The extractor reported success but left no file behind.
    #[error("artifact not found")]
    ArtifactNotFound,

    /// Workspace could not be scanned.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
}

/// Result of downloading one URL.
pub type DownloadOutcome = Result<Artifact, DownloadError>;

/// Lifecycle states of a run, in the order they can be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Uninitialized,
    WorkspaceReady,
    Probing,
    ProbeFailed,
    ProbeSucceeded,
    Downloading,
    Finished,
    Interrupted,
    ShutDown,
}

/// Outcome of probing one URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Reachable(VideoMetadata),
    Unreachable { reason: String },
}

/// A single probe attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeAttempt {
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// Result of the connectivity probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    /// Whether any probe URL was reachable.
    pub reachable: bool,
    /// Attempts made, in order. Stops at the first reachable URL.
    pub attempts: Vec<ProbeAttempt>,
}

/// Outcome of one iteration of the download sequence.
#[derive(Debug)]
pub struct DownloadRecord {
    pub url: String,
    pub outcome: DownloadOutcome,
    /// Whether the artifact was deleted after being reported.
    pub artifact_removed: bool,
}

/// How the workspace release went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownStatus {
    /// Workspace directory deleted.
    Removed(PathBuf),
    /// Deletion failed; the reason was logged.
    Failed { path: PathBuf, reason: String },
}

impl ShutdownStatus {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Everything that happened during one run.
#[derive(Debug)]
pub struct RunReport {
    /// States entered, in order.
    pub transitions: Vec<RunState>,
    /// Probe result, if probing completed.
    pub probe: Option<ProbeResult>,
    /// One record per attempted download.
    pub downloads: Vec<DownloadRecord>,
    /// Whether the run was cut short by an interruption.
    pub interrupted: bool,
    /// Workspace release result; always set once the run returns.
    pub shutdown: Option<ShutdownStatus>,
}

impl RunReport {
    /// A report for a run whose workspace is already in place.
    pub(crate) fn new() -> Self {
        Self {
            transitions: vec![RunState::Uninitialized, RunState::WorkspaceReady],
            probe: None,
            downloads: Vec::new(),
            interrupted: false,
            shutdown: None,
        }
    }

    pub(crate) fn enter(&mut self, state: RunState) {
        self.transitions.push(state);
    }

    /// Last state entered.
    pub fn final_state(&self) -> RunState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(RunState::Uninitialized)
    }

    /// Number of downloads that produced an artifact.
    pub fn succeeded(&self) -> usize {
        self.downloads.iter().filter(|d| d.outcome.is_ok()).count()
    }

    /// Number of downloads that produced no artifact.
    pub fn failed(&self) -> usize {
        self.downloads.len() - self.succeeded()
    }

    /// How many times the given state was entered.
    pub fn times_entered(&self, state: RunState) -> usize {
        self.transitions.iter().filter(|s| **s == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_display() {
        assert_eq!(DownloadError::ArtifactNotFound.to_string(), "artifact not found");

        let err =
            DownloadError::Metadata(ExtractorError::extraction_failed("Video unavailable", None));
        assert_eq!(
            err.to_string(),
            "metadata request failed: metadata extraction failed: Video unavailable"
        );
    }

    #[test]
    fn test_run_state_serialization() {
        let json = serde_json::to_string(&RunState::ProbeSucceeded).unwrap();
        assert_eq!(json, "\"probe_succeeded\"");
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new();
        report.downloads.push(DownloadRecord {
            url: "a".to_string(),
            outcome: Ok(Artifact {
                path: PathBuf::from("/tmp/a.mp4"),
                size_bytes: 10,
            }),
            artifact_removed: true,
        });
        report.downloads.push(DownloadRecord {
            url: "b".to_string(),
            outcome: Err(DownloadError::ArtifactNotFound),
            artifact_removed: false,
        });
        report.enter(RunState::Finished);

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.final_state(), RunState::Finished);
        assert_eq!(report.times_entered(RunState::WorkspaceReady), 1);
    }
}
