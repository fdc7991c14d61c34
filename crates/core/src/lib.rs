pub mod config;
pub mod extractor;
pub mod orchestrator;
pub mod testing;
pub mod workspace;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, DownloadConfig, ProbeConfig, WorkspaceConfig, DEFAULT_TEST_URLS,
};
pub use extractor::{
    ExtractOptions, Extractor, ExtractorConfig, ExtractorError, Quality, VideoMetadata,
    YtDlpExtractor,
};
pub use orchestrator::{
    DownloadError, DownloadOutcome, DownloadRecord, Orchestrator, OrchestratorConfig,
    OrchestratorError, ProbeAttempt, ProbeOutcome, ProbeResult, RunReport, RunState,
    ShutdownStatus,
};
pub use workspace::{Artifact, Workspace, WorkspaceError};
