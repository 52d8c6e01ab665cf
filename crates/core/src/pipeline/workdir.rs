//! Per-run ephemeral working directory.

use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// A randomly named directory exclusively owned by one `perform_conversions`
/// invocation. Every intermediate file lives here under a randomized name,
/// so concurrent runs for distinct media never share a path.
///
/// The directory is removed recursively on drop, which guarantees release on
/// every exit path — success, fatal error or partial-success early return.
#[derive(Debug)]
pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    /// Allocates a fresh directory under `root`, creating `root` if needed.
    pub async fn allocate(root: &Path) -> std::io::Result<Self> {
        let path = root.join(Uuid::new_v4().simple().to_string());
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    /// The directory's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh randomized file path inside the directory with the given
    /// extension.
    pub fn random_file(&self, extension: &str) -> PathBuf {
        self.path
            .join(format!("{}.{}", Uuid::new_v4().simple(), extension))
    }

    /// A fresh randomized file path prefixed with a label, useful for
    /// per-conversion scratch copies.
    pub fn random_file_labeled(&self, label: &str, extension: &str) -> PathBuf {
        self.path.join(format!(
            "{}-{}.{}",
            Uuid::new_v4().simple(),
            label,
            extension
        ))
    }

    /// A fixed-name path inside the directory, for staging side-artifacts
    /// like `thumb.pdf`.
    pub fn named_file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_dir_all(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %error, "failed to release working directory");
            }
        }
    }
}
