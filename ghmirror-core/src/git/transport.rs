//! `git clone --bare` and `git push --mirror` via the git executable

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{Error, RemoteUrl, RepoId, Result};

/// Moves repository data between remotes and the workspace
#[async_trait]
pub trait GitTransport: Send + Sync {
    /// Bare-clone `url` into `dest`, which must not exist yet
    async fn clone_bare(&self, repo: &RepoId, url: &RemoteUrl, dest: &Path) -> Result<()>;

    /// Mirror-push every ref of the bare clone at `clone_dir` to `url`
    async fn push_mirror(&self, repo: &RepoId, clone_dir: &Path, url: &RemoteUrl) -> Result<()>;
}

/// [`GitTransport`] backed by the `git` command line client
#[derive(Debug, Clone)]
pub struct GitCli {
    git_path: String,
}

impl GitCli {
    /// Use `git` from PATH
    pub fn new() -> Self {
        Self {
            git_path: "git".to_string(),
        }
    }

    /// Use a custom git executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.git_path = path.into();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git_path);
        // Never block on a credential prompt
        cmd.env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    async fn output(&self, cmd: &mut Command) -> Result<Output> {
        cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "git executable not found at '{}'. Is git installed?",
                    self.git_path
                ))
            } else {
                Error::Io(e)
            }
        })
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Scrubbed stderr, or the exit status when git printed nothing
fn failure_message(output: &Output, url: &RemoteUrl) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        url.scrub(stderr)
    }
}

#[async_trait]
impl GitTransport for GitCli {
    async fn clone_bare(&self, repo: &RepoId, url: &RemoteUrl, dest: &Path) -> Result<()> {
        debug!(repo = %repo, url = %url, dest = %dest.display(), "git clone --bare");

        let mut cmd = self.command();
        cmd.arg("clone").arg("--bare").arg(url.as_str()).arg(dest);
        let output = self.output(&mut cmd).await?;

        if !output.status.success() {
            return Err(Error::Clone {
                repo: repo.clone(),
                message: failure_message(&output, url),
            });
        }
        Ok(())
    }

    async fn push_mirror(&self, repo: &RepoId, clone_dir: &Path, url: &RemoteUrl) -> Result<()> {
        debug!(repo = %repo, url = %url, "git push --mirror");

        let mut cmd = self.command();
        cmd.arg("-C")
            .arg(clone_dir)
            .arg("push")
            .arg("--mirror")
            .arg(url.as_str());
        let output = self.output(&mut cmd).await?;

        if !output.status.success() {
            return Err(Error::Push {
                repo: repo.clone(),
                message: failure_message(&output, url),
            });
        }
        Ok(())
    }
}
