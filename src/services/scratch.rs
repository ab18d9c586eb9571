use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::ListRole;
use crate::utils::validation::InputFormat;

/// Root directory that holds one sub-directory per in-flight request
#[derive(Debug)]
pub struct ScratchSpace {
    root: PathBuf,
    keep_files: bool,
}

impl ScratchSpace {
    /// Opens the scratch root, creating it if absent
    pub async fn create(root: impl Into<PathBuf>, keep_files: bool) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, keep_files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Opens an isolated session directory named by a fresh UUID
    pub async fn session(&self) -> io::Result<ScratchSession> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());
        tokio::fs::create_dir(&dir).await?;

        Ok(ScratchSession {
            id,
            dir,
            keep_files: self.keep_files,
            closed: false,
        })
    }

    /// Removes session directories left behind by an earlier process.
    /// Only directories named like a session are touched.
    pub async fn purge_stale(&self) -> io::Result<usize> {
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let is_session = entry
                .file_name()
                .to_str()
                .is_some_and(|name| Uuid::parse_str(name).is_ok());
            if !is_session || !entry.file_type().await?.is_dir() {
                continue;
            }

            match tokio::fs::remove_dir_all(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(
                    "Failed to remove stale scratch dir {}: {}",
                    entry.path().display(),
                    e
                ),
            }
        }

        Ok(removed)
    }
}

/// Per-request scratch directory, removed by [`ScratchSession::close`]
/// unless files are kept.
///
/// Dropping an unclosed session (a cancelled or panicking request) removes
/// the directory synchronously as a fallback.
#[derive(Debug)]
pub struct ScratchSession {
    id: Uuid,
    dir: PathBuf,
    keep_files: bool,
    closed: bool,
}

impl ScratchSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Storage path for an upload. Client filenames never reach this.
    pub fn path_for(&self, role: ListRole, format: InputFormat) -> PathBuf {
        self.dir
            .join(format!("{}.{}", role.file_stem(), format.extension()))
    }

    /// Writes an upload into the session, replacing any earlier upload for
    /// the same role and format
    pub async fn store(
        &self,
        role: ListRole,
        format: InputFormat,
        data: &[u8],
    ) -> io::Result<PathBuf> {
        let path = self.path_for(role, format);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    /// Removes the session directory on the blocking pool
    pub async fn close(mut self) {
        self.closed = true;
        if self.keep_files {
            return;
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            log_cleanup_failure(&self.dir, &e);
        }
    }
}

fn log_cleanup_failure(dir: &Path, e: &io::Error) {
    if e.kind() != io::ErrorKind::NotFound {
        tracing::warn!("Failed to clean scratch dir {}: {}", dir.display(), e);
    }
}

impl Drop for ScratchSession {
    fn drop(&mut self) {
        if self.closed || self.keep_files {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            log_cleanup_failure(&self.dir, &e);
        }
    }
}
