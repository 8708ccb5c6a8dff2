//! Keeps archived images on a dedicated git branch used as a rolling snapshot store.

pub mod git;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::error::RepositoryError;

pub use git::GitCli;

const INIT_MESSAGE: &str = "Initialise content branch";
const COMMIT_MESSAGE: &str = "Update rain area images";

/// Version control operations needed to maintain the content branch.
pub trait VersionControl {
    async fn list_remote_branches(&self) -> Result<Vec<String>>;

    /// Shallow clone of `branch`, or of the default branch when `None`.
    async fn clone_branch(&self, branch: Option<&str>, dir: &Path) -> Result<()>;

    async fn create_branch(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Removes every tracked file from the working tree and the index.
    async fn clear_tracked(&self, dir: &Path) -> Result<()>;

    /// Stages all changes, deletions included, and commits them.
    async fn commit(&self, dir: &Path, message: &str) -> Result<()>;

    async fn push(&self, dir: &Path, branch: &str, force: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryState {
    Uninitialized,
    Ready,
    Synced,
}

pub struct ContentRepository<V> {
    vcs: Option<V>,
    branch: String,
    data_root: PathBuf,
    state: RepositoryState,
}

impl<V: VersionControl> ContentRepository<V> {
    /// Writes go straight to `data_root`; nothing is committed or pushed.
    pub fn local(data_root: PathBuf) -> Self {
        ContentRepository {
            vcs: None,
            branch: String::new(),
            data_root,
            state: RepositoryState::Uninitialized,
        }
    }

    /// Maintains `branch` checked out at `checkout_dir`.
    pub fn remote(vcs: V, checkout_dir: PathBuf, branch: &str) -> Self {
        ContentRepository {
            vcs: Some(vcs),
            branch: branch.to_string(),
            data_root: checkout_dir,
            state: RepositoryState::Uninitialized,
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    #[cfg(test)]
    pub fn state(&self) -> RepositoryState {
        self.state
    }

    /// Checks out the content branch, creating it as an empty snapshot when the remote
    /// does not have it yet. An existing checkout is reused. Existing content is never wiped.
    pub async fn open(&mut self) -> Result<(), RepositoryError> {
        if self.state == RepositoryState::Ready {
            return Ok(());
        }

        let Some(vcs) = &self.vcs else {
            warn!("No workspace configured, skipping content repository");
            self.state = RepositoryState::Ready;
            return Ok(());
        };

        let branch = self.branch.as_str();
        let dir = self.data_root.as_path();

        if dir.join(".git").exists() {
            info!("Reusing checkout of `{}` at {}", branch, dir.display());
            self.state = RepositoryState::Ready;
            return Ok(());
        }

        let branches = vcs
            .list_remote_branches()
            .await
            .map_err(|e| RepositoryError::RemoteBranches {
                reason: format!("{e:#}"),
            })?;

        if branches.iter().any(|b| b == branch) {
            info!("Cloning content branch `{}`", branch);
            vcs.clone_branch(Some(branch), dir)
                .await
                .map_err(|e| clone_error(branch, e))?;
        } else {
            info!("Content branch `{}` not found, creating it", branch);
            vcs.clone_branch(None, dir)
                .await
                .map_err(|e| clone_error(branch, e))?;

            let branch_error = |e: anyhow::Error| RepositoryError::Branch {
                branch: branch.to_string(),
                reason: format!("{e:#}"),
            };
            vcs.create_branch(dir, branch).await.map_err(branch_error)?;
            vcs.clear_tracked(dir).await.map_err(branch_error)?;
            vcs.commit(dir, INIT_MESSAGE).await.map_err(branch_error)?;
            vcs.push(dir, branch, false).await.map_err(branch_error)?;
        }

        self.state = RepositoryState::Ready;
        Ok(())
    }

    /// Commits everything in the working tree and force-pushes it to the content branch.
    pub async fn close(&mut self) -> Result<(), RepositoryError> {
        if self.state != RepositoryState::Ready {
            return Err(RepositoryError::NotOpen);
        }

        if let Some(vcs) = &self.vcs {
            let branch = self.branch.as_str();
            let dir = self.data_root.as_path();
            let sync_error = |step: &'static str| {
                move |e: anyhow::Error| RepositoryError::Sync {
                    branch: branch.to_string(),
                    step,
                    reason: format!("{e:#}"),
                }
            };

            vcs.commit(dir, COMMIT_MESSAGE)
                .await
                .map_err(sync_error("commit"))?;
            vcs.push(dir, branch, true)
                .await
                .map_err(sync_error("push"))?;
            info!("Pushed content branch `{}`", branch);
        }

        self.state = RepositoryState::Synced;
        Ok(())
    }
}

fn clone_error(branch: &str, e: anyhow::Error) -> RepositoryError {
    RepositoryError::Clone {
        branch: branch.to_string(),
        reason: format!("{e:#}"),
    }
}

// -- Tests -------------------------------------------------------------------
