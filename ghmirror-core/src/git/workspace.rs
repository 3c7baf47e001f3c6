//! Per-job clone workspace

use std::path::Path;

use tempfile::TempDir;
use tracing::debug;

use crate::Result;

/// Name of the bare clone inside the workspace
const CLONE_DIR: &str = "source";

/// Prefix of the temporary workspace directory
const WORKSPACE_PREFIX: &str = "ghmirror-";

/// Staging area holding the bare clone of exactly one job
///
/// The workspace directory is exclusively owned by this handle and removed
/// when it is dropped, whichever way the job ends.
#[derive(Debug)]
pub struct Workspace {
    root: TempDir,
    clone_dir: std::path::PathBuf,
}

impl Workspace {
    /// Create a fresh workspace under `parent`, or the system temp dir
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let root = match parent {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempdir_in(dir)?
            }
            None => builder.tempdir()?,
        };
        let clone_dir = root.path().join(CLONE_DIR);

        debug!(path = %root.path().display(), "Created workspace");
        Ok(Self { root, clone_dir })
    }

    /// Workspace directory
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Target of `git clone --bare`
    pub fn clone_dir(&self) -> &Path {
        &self.clone_dir
    }

    /// Whether the clone directory is absent
    pub fn is_clear(&self) -> bool {
        !self.clone_dir.exists()
    }

    /// Remove the clone directory, if any
    pub async fn reset(&mut self) -> Result<()> {
        match tokio::fs::remove_dir_all(&self.clone_dir).await {
            Ok(()) => {
                debug!(path = %self.clone_dir.display(), "Removed clone");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
