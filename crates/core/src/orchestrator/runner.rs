//! Run orchestrator implementation.
//!
//! Drives one run through its lifecycle:
//! - Probe: metadata-only requests until one URL answers
//! - Download: one URL at a time, artifact deleted right after it is reported
//! - Shutdown: workspace removed, always, exactly once

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::extractor::{ExtractOptions, Extractor, Quality};
use crate::workspace::{Artifact, Workspace};

use super::config::OrchestratorConfig;
use super::types::{
    DownloadError, DownloadRecord, OrchestratorError, ProbeAttempt, ProbeOutcome, ProbeResult,
    RunReport, RunState, ShutdownStatus,
};

/// The orchestrator - owns the workspace and sequences every extractor call.
pub struct Orchestrator {
    config: OrchestratorConfig,
    extractor: Arc<dyn Extractor>,
    workspace: Workspace,
}

impl Orchestrator {
    /// Create the workspace and the orchestrator that owns it.
    ///
    /// Workspace creation is the only failure that aborts a run.
    pub fn initialize(
        config: OrchestratorConfig,
        extractor: Arc<dyn Extractor>,
    ) -> Result<Self, OrchestratorError> {
        let workspace = Workspace::create(config.workspace_parent.as_deref())?;
        info!("Download directory: {}", workspace.path().display());

        Ok(Self {
            config,
            extractor,
            workspace,
        })
    }

    /// Path of the workspace directory.
    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Try each URL in order with a metadata-only request.
    ///
    /// Returns as soon as one URL answers; the remaining URLs are not tried.
    pub async fn probe_connectivity(&self, urls: &[String]) -> ProbeResult {
        let mut result = ProbeResult::default();
        let options = ExtractOptions::metadata_only();

        for (i, url) in urls.iter().enumerate() {
            let index = i + 1;
            info!("Testing access #{}: {}", index, url);

            match self.extractor.extract_info(url, &options).await {
                Ok(metadata) => {
                    info!("Test #{} succeeded", index);
                    info!("  Title: {}", metadata.title_or_unknown());
                    info!("  Duration: {} seconds", metadata.duration_or_unknown());
                    info!("  Uploader: {}", metadata.uploader_or_unknown());

                    result.attempts.push(ProbeAttempt {
                        url: url.clone(),
                        outcome: ProbeOutcome::Reachable(metadata),
                    });
                    result.reachable = true;
                    return result;
                }
                Err(e) => {
                    error!("Test #{} failed: {}", index, e);
                    result.attempts.push(ProbeAttempt {
                        url: url.clone(),
                        outcome: ProbeOutcome::Unreachable {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        error!("All access tests failed");
        result
    }

    /// Fetch metadata for `url`, download it into the workspace and return the
    /// file that appeared there.
    pub async fn download_one(
        &self,
        url: &str,
        prefer_highest_quality: bool,
    ) -> Result<Artifact, DownloadError> {
        info!("Starting download: {}", url);

        let options = ExtractOptions::for_download(
            self.workspace.path(),
            Quality::from_prefer_highest(prefer_highest_quality),
        )
        .map_err(DownloadError::Options)?;

        let metadata = self
            .extractor
            .extract_info(url, &options)
            .await
            .map_err(DownloadError::Metadata)?;

        info!("Video info:");
        info!("  Title: {}", metadata.title_or_unknown());
        info!("  Duration: {} seconds", metadata.duration_or_unknown());
        info!("  Uploader: {}", metadata.uploader_or_unknown());
        info!("  View count: {}", metadata.view_count_or_unknown());

        info!("Requesting {} quality download", options.quality());
        self.extractor
            .download(url, &options)
            .await
            .map_err(DownloadError::Download)?;

        match self.workspace.find_artifact().await? {
            Some(artifact) => {
                info!("Download succeeded:");
                info!("  File: {}", artifact.file_name());
                info!("  Size: {:.2} MB", artifact.size_mb());
                info!("  Path: {}", artifact.path.display());
                Ok(artifact)
            }
            None => {
                error!("Downloaded file not found in {}", self.workspace.path().display());
                Err(DownloadError::ArtifactNotFound)
            }
        }
    }

    /// Download each URL in turn, deleting every artifact right after it is
    /// reported and pausing `delay` between items (not after the last one).
    pub async fn run_sequence(&self, urls: &[String], delay: Duration) -> Vec<DownloadRecord> {
        let mut records = Vec::with_capacity(urls.len());
        self.run_sequence_into(urls, delay, &mut records).await;
        records
    }

    /// Same as [`run_sequence`](Self::run_sequence), but records outcomes as
    /// they happen so an interrupted run keeps what it already did.
    async fn run_sequence_into(
        &self,
        urls: &[String],
        delay: Duration,
        records: &mut Vec<DownloadRecord>,
    ) {
        for (i, url) in urls.iter().enumerate() {
            let index = i + 1;
            info!("Downloading video #{}: {}", index, url);

            let outcome = self
                .download_one(url, self.config.prefer_highest_quality)
                .await;

            let artifact_removed = match &outcome {
                Ok(artifact) => {
                    info!("Video #{} downloaded successfully", index);
                    self.discard_artifact(artifact).await
                }
                Err(e) => {
                    error!("Video #{} download failed: {}", index, e);
                    self.clear_leftovers().await;
                    false
                }
            };

            records.push(DownloadRecord {
                url: url.clone(),
                outcome,
                artifact_removed,
            });

            if index < urls.len() && !delay.is_zero() {
                info!(
                    "Waiting {} seconds before next download...",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Delete a reported artifact. Returns whether it is gone; a failure is
    /// only logged.
    async fn discard_artifact(&self, artifact: &Artifact) -> bool {
        match self.workspace.remove_artifact(artifact).await {
            Ok(()) => {
                info!("Cleaned up: {}", artifact.file_name());
                true
            }
            Err(e) => {
                warn!("Could not clean up {}: {}", artifact.file_name(), e);
                false
            }
        }
    }

    /// Delete whatever a failed download left behind (partial files).
    async fn clear_leftovers(&self) {
        match self.workspace.clear_leftovers().await {
            Ok(0) => {}
            Ok(n) => info!("Removed {} leftover file(s) from the failed download", n),
            Err(e) => warn!("Could not clear leftovers: {}", e),
        }
    }

    /// Remove the workspace. Failures are logged, never returned as errors.
    pub fn shutdown(self) -> ShutdownStatus {
        let path = self.workspace.path().to_path_buf();
        match self.workspace.close() {
            Ok(path) => {
                info!("Cleaned up: {}", path.display());
                ShutdownStatus::Removed(path)
            }
            Err(e) => {
                warn!("Cleanup failed: {}", e);
                ShutdownStatus::Failed {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run the full lifecycle: probe, download sequence, shutdown.
    ///
    /// `interrupt` resolving aborts whatever call or pause is in flight; the
    /// workspace is released afterward in every case.
    pub async fn run<F>(self, interrupt: F) -> RunReport
    where
        F: Future<Output = ()>,
    {
        let mut report = RunReport::new();

        let interrupted = tokio::select! {
            _ = self.probe_and_download(&mut report) => false,
            _ = interrupt => true,
        };

        if interrupted {
            info!("Run interrupted by user");
            report.interrupted = true;
            report.enter(RunState::Interrupted);
        }

        let status = self.shutdown();
        report.enter(RunState::ShutDown);
        report.shutdown = Some(status);

        if !report.downloads.is_empty() {
            info!(
                "Downloads: {} succeeded, {} failed",
                report.succeeded(),
                report.failed()
            );
        }

        report
    }

    async fn probe_and_download(&self, report: &mut RunReport) {
        match self.extractor.validate().await {
            Ok(version) => info!("Extractor {} version {}", self.extractor.name(), version),
            Err(e) => error!(
                "Extractor {} is not usable: {} (is it installed and on PATH?)",
                self.extractor.name(),
                e
            ),
        }

        report.enter(RunState::Probing);
        info!("Testing platform access...");
        let probe = self.probe_connectivity(&self.config.probe_urls).await;
        let reachable = probe.reachable;
        report.probe = Some(probe);

        if !reachable {
            report.enter(RunState::ProbeFailed);
            error!("Cannot access the platform from this host");
            error!("Possible issues:");
            error!("  IP blocked by the platform");
            error!("  Geographical restrictions");
            error!("  Network configuration issues");
            return;
        }

        report.enter(RunState::ProbeSucceeded);
        info!("Platform access confirmed");

        report.enter(RunState::Downloading);
        let delay = Duration::from_secs(self.config.inter_download_delay_secs);
        self.run_sequence_into(&self.config.download_urls, delay, &mut report.downloads)
            .await;

        report.enter(RunState::Finished);
        info!("All downloads completed");
    }
}
