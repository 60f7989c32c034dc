//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] fetch_my_git_git::GitError),

    /// The working copy tracks a different URL than the config declares.
    #[error("URL of {remote}/{branch} in repo {path} is {actual} but expected {expected}")]
    RemoteUrlMismatch {
        /// Remote name.
        remote: String,
        /// Tracked branch.
        branch: String,
        /// Working copy path.
        path: PathBuf,
        /// URL found on disk.
        actual: String,
        /// URL from the config.
        expected: String,
    },

    /// A scan root is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
