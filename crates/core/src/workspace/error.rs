//! Error types for the workspace module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while managing the workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The temporary directory could not be created.
    #[error("Failed to create workspace under {parent}")]
    CreateFailed {
        parent: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace directory could not be listed.
    #[error("Failed to scan workspace {path}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be deleted.
    #[error("Failed to remove artifact {path}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace directory could not be deleted.
    #[error("Failed to remove workspace {path}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
