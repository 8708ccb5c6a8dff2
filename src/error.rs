use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Unable to list remote branches: {reason}")]
    RemoteBranches { reason: String },
    #[error("Unable to clone {branch}: {reason}")]
    Clone { branch: String, reason: String },
    #[error("Unable to create branch {branch}: {reason}")]
    Branch { branch: String, reason: String },
    #[error("Unable to synchronise content branch {branch} ({step}): {reason}")]
    Sync {
        branch: String,
        step: &'static str,
        reason: String,
    },
    #[error("Content repository has not been opened")]
    NotOpen,
}
