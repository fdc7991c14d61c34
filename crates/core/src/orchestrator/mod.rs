//! Run orchestrator: probe connectivity, then download and discard each test
//! video in turn.
//!
//! The whole run is sequential: one extractor call at a time, a fixed pause
//! between downloads, and a single shared workspace that is released exactly
//! once when the run ends, however it ends.

mod config;
mod runner;
mod types;

pub use config::OrchestratorConfig;
pub use runner::Orchestrator;
pub use types::{
    DownloadError, DownloadOutcome, DownloadRecord, OrchestratorError, ProbeAttempt,
    ProbeOutcome, ProbeResult, RunReport, RunState, ShutdownStatus,
};
