//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// Repository has no working directory.
    #[error("bare repository has no working copy: {0}")]
    BareRepository(PathBuf),

    /// Remote not configured.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// Remote configured without a URL.
    #[error("remote {0} has no URL")]
    RemoteUrlMissing(String),

    /// Branch or remote-tracking branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// HEAD does not point to a branch.
    #[error("HEAD is detached")]
    DetachedHead,

    /// Fast-forward impossible because histories diverged.
    #[error("cannot fast-forward {branch} to {target}: histories have diverged")]
    NonFastForward {
        /// Branch being updated.
        branch: String,
        /// Remote-tracking branch merged in.
        target: String,
    },

    /// Clone failed.
    #[error("failed to clone {url}: {source}")]
    Clone {
        /// Source URL.
        url: String,
        /// Underlying libgit2 error.
        #[source]
        source: git2::Error,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_remote_not_found_display() {
        let err = GitError::RemoteNotFound("upstream".to_string());
        assert_eq!(err.to_string(), "remote not found: upstream");
    }

    #[test]
    fn test_non_fast_forward_display() {
        let err = GitError::NonFastForward {
            branch: "master".to_string(),
            target: "origin/master".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot fast-forward master to origin/master: histories have diverged"
        );
    }

    #[test]
    fn test_error_is_debug() {
        let err = GitError::DetachedHead;
        let debug = format!("{err:?}");
        assert!(debug.contains("DetachedHead"));
    }
}
