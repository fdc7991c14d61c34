use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use super::error::WorkspaceError;

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "tubecheck-";

/// Whether `name` is one of yt-dlp's in-progress files rather than a
/// finished download.
pub fn is_in_progress(name: &str) -> bool {
    name.ends_with(".part") || name.ends_with(".ytdl") || name.contains(".part-Frag")
}

/// A file produced by the extractor inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Artifact {
    /// File name of the artifact, lossily converted for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Size in mebibytes, for log output.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Exclusively owned temporary directory for one run.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh workspace under `parent`, or under the system temp dir.
    pub fn create(parent: Option<&Path>) -> Result<Self, WorkspaceError> {
        let parent = parent
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);

        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&parent)
            .map_err(|source| WorkspaceError::CreateFailed { parent, source })?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the first finished, non-hidden regular file, in file name
    /// order. In-progress files are never returned.
    pub async fn find_artifact(&self) -> Result<Option<Artifact>, WorkspaceError> {
        let scan_err = |source| WorkspaceError::ScanFailed {
            path: self.path().to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(self.path()).await.map_err(scan_err)?;
        let mut candidates = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(scan_err)? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || is_in_progress(&name) {
                continue;
            }
            let metadata = entry.metadata().await.map_err(scan_err)?;
            if metadata.is_file() {
                candidates.push(Artifact {
                    path: entry.path(),
                    size_bytes: metadata.len(),
                });
            }
        }

        candidates.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(candidates.into_iter().next())
    }

    /// Number of non-hidden regular files currently in the workspace.
    pub async fn artifact_count(&self) -> Result<usize, WorkspaceError> {
        let scan_err = |source| WorkspaceError::ScanFailed {
            path: self.path().to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(self.path()).await.map_err(scan_err)?;
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.map_err(scan_err)? {
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if !hidden && entry.file_type().await.map_err(scan_err)?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Deletes an artifact from the workspace.
    pub async fn remove_artifact(&self, artifact: &Artifact) -> Result<(), WorkspaceError> {
        fs::remove_file(&artifact.path)
            .await
            .map_err(|source| WorkspaceError::RemoveFailed {
                path: artifact.path.clone(),
                source,
            })
    }

    /// Deletes every regular file left in the workspace and returns how many
    /// were removed. Stops at the first file that cannot be deleted.
    pub async fn clear_leftovers(&self) -> Result<usize, WorkspaceError> {
        let scan_err = |source| WorkspaceError::ScanFailed {
            path: self.path().to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(self.path()).await.map_err(scan_err)?;
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await.map_err(scan_err)? {
            if !entry.file_type().await.map_err(scan_err)?.is_file() {
                continue;
            }
            let path = entry.path();
            fs::remove_file(&path)
                .await
                .map_err(|source| WorkspaceError::RemoveFailed { path, source })?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Recursively deletes the workspace directory.
    pub fn close(self) -> Result<PathBuf, WorkspaceError> {
        let path = self.path().to_path_buf();
        self.dir
            .close()
            .map(|()| path.clone())
            .map_err(|source| WorkspaceError::CleanupFailed { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_parent() {
        let parent = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(Some(parent.path())).unwrap();
        assert!(workspace.path().is_dir());
        assert!(workspace.path().starts_with(parent.path()));
        assert!(workspace
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(WORKSPACE_PREFIX));
    }

    #[test]
    fn test_create_in_missing_parent_fails() {
        let result = Workspace::create(Some(Path::new("/nonexistent/parent/dir")));
        assert!(matches!(result, Err(WorkspaceError::CreateFailed { .. })));
    }

    #[tokio::test]
    async fn test_find_artifact_empty() {
        let workspace = Workspace::create(None).unwrap();
        assert!(workspace.find_artifact().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_artifact_skips_hidden_and_dirs() {
        let workspace = Workspace::create(None).unwrap();
        std::fs::write(workspace.path().join(".hidden"), b"x").unwrap();
        std::fs::create_dir(workspace.path().join("subdir")).unwrap();
        std::fs::write(workspace.path().join("b.mp4"), b"bbbb").unwrap();
        std::fs::write(workspace.path().join("a.webm"), b"aa").unwrap();

        let artifact = workspace.find_artifact().await.unwrap().unwrap();
        assert_eq!(artifact.file_name(), "a.webm");
        assert_eq!(artifact.size_bytes, 2);
        assert_eq!(workspace.artifact_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_remove_artifact() {
        let workspace = Workspace::create(None).unwrap();
        std::fs::write(workspace.path().join("video.mp4"), b"data").unwrap();

        let artifact = workspace.find_artifact().await.unwrap().unwrap();
        workspace.remove_artifact(&artifact).await.unwrap();
        assert_eq!(workspace.artifact_count().await.unwrap(), 0);

        // Removing twice reports the failure instead of panicking
        let result = workspace.remove_artifact(&artifact).await;
        assert!(matches!(result, Err(WorkspaceError::RemoveFailed { .. })));
    }

    #[tokio::test]
    async fn test_find_artifact_skips_in_progress_files() {
        let workspace = Workspace::create(None).unwrap();
        std::fs::write(workspace.path().join("Alpha.mp4.part"), b"partial").unwrap();
        std::fs::write(workspace.path().join("Alpha.mp4.ytdl"), b"{}").unwrap();
        std::fs::write(workspace.path().join("Alpha.f137.mp4.part-Frag3"), b"x").unwrap();
        assert!(workspace.find_artifact().await.unwrap().is_none());

        std::fs::write(workspace.path().join("Beta.mp4"), b"finished").unwrap();
        let artifact = workspace.find_artifact().await.unwrap().unwrap();
        assert_eq!(artifact.file_name(), "Beta.mp4");
    }

    #[test]
    fn test_is_in_progress() {
        assert!(is_in_progress("video.mp4.part"));
        assert!(is_in_progress("video.mp4.ytdl"));
        assert!(is_in_progress("video.f140.m4a.part-Frag12"));
        assert!(!is_in_progress("video.mp4"));
        assert!(!is_in_progress("partial results.webm"));
    }

    #[tokio::test]
    async fn test_clear_leftovers() {
        let workspace = Workspace::create(None).unwrap();
        std::fs::write(workspace.path().join("Alpha.mp4.part"), b"partial").unwrap();
        std::fs::write(workspace.path().join(".hidden"), b"x").unwrap();
        std::fs::create_dir(workspace.path().join("subdir")).unwrap();

        assert_eq!(workspace.clear_leftovers().await.unwrap(), 2);
        assert!(!workspace.path().join("Alpha.mp4.part").exists());
        assert!(workspace.path().join("subdir").is_dir());
        assert_eq!(workspace.clear_leftovers().await.unwrap(), 0);
    }

    #[test]
    fn test_close_removes_directory_recursively() {
        let workspace = Workspace::create(None).unwrap();
        std::fs::create_dir(workspace.path().join("nested")).unwrap();
        std::fs::write(workspace.path().join("nested").join("f"), b"x").unwrap();

        let path = workspace.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let workspace = Workspace::create(None).unwrap();
        let path = workspace.path().to_path_buf();
        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_size_mb() {
        let artifact = Artifact {
            path: PathBuf::from("/tmp/x/video.mp4"),
            size_bytes: 3 * 1024 * 1024 + 512 * 1024,
        };
        assert!((artifact.size_mb() - 3.5).abs() < f64::EPSILON);
        assert_eq!(artifact.file_name(), "video.mp4");
    }
}
