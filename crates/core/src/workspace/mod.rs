//! Scoped temporary directory that receives every download of a run.
//!
//! The [`Workspace`] is created once at startup and released once at
//! shutdown. Releasing is explicit through [`Workspace::close`] so failures can
//! be logged; dropping an unclosed workspace still removes the directory.

mod error;
mod scoped;

pub use error::WorkspaceError;
pub use scoped::{Artifact, Workspace, WORKSPACE_PREFIX};
