//! Supervision of a single working copy.

use std::path::{Path, PathBuf};

use fetch_my_git_config::RepositoryEntry;
use fetch_my_git_git::{FetchProgress, FetchSettings, GitError, WorkingCopy};
use tracing::{debug, info};

use crate::{CommitState, CoreError, CoreResult, SyncState};

/// Keeps one local working copy in line with its tracked remote.
pub struct Supervisor {
    entry: RepositoryEntry,
    path: PathBuf,
    repo: WorkingCopy,
}

impl Supervisor {
    /// Opens the entry's working copy, cloning it first if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails, the tracked remote is missing, or
    /// its URL differs from the one in the entry.
    pub fn open(entry: RepositoryEntry, settings: &FetchSettings) -> CoreResult<Self> {
        let path = entry.local_path();

        let repo = match WorkingCopy::open(&path) {
            Ok(repo) => repo,
            Err(GitError::NotARepo(_)) => {
                info!(?path, "no repo found, trying to clone it");
                WorkingCopy::clone_into(
                    &entry.remote_url,
                    &path,
                    &entry.remote_name,
                    &entry.branch,
                    settings,
                )?
            }
            Err(e) => return Err(e.into()),
        };
        info!(?path, "found git repo");

        let actual = repo.remote_url(&entry.remote_name)?;
        if actual != entry.remote_url {
            return Err(CoreError::RemoteUrlMismatch {
                remote: entry.remote_name,
                branch: entry.branch,
                path,
                actual,
                expected: entry.remote_url,
            });
        }

        Ok(Self { entry, path, repo })
    }

    /// Returns the working copy path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads both branch tips and their merge base.
    ///
    /// # Errors
    ///
    /// Returns an error if either branch is missing or the histories share
    /// no commit.
    pub fn update_commits(&self) -> CoreResult<CommitState> {
        let RepositoryEntry {
            remote_name,
            branch,
            ..
        } = &self.entry;

        let local_commit = self.repo.branch_tip(branch)?;
        let remote_commit = self.repo.remote_branch_tip(remote_name, branch)?;
        let common_base = self.repo.merge_base(local_commit, remote_commit)?;

        debug!(
            %local_commit,
            %remote_commit,
            %common_base,
            "updated commits"
        );
        Ok(CommitState {
            local_commit,
            remote_commit,
            common_base,
        })
    }

    /// Fetches the tracked remote and, if enabled, merges it.
    ///
    /// With `hard_reset` the branch is first rewound to the merge base,
    /// dropping local commits, so the fast-forward cannot fail on history.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the branch cannot be
    /// fast-forwarded.
    pub fn proceed(
        &self,
        settings: &FetchSettings,
        progress: Option<&mut dyn FnMut(&FetchProgress)>,
    ) -> CoreResult<()> {
        let RepositoryEntry {
            remote_name,
            branch,
            auto_merge,
            hard_reset,
            ..
        } = &self.entry;

        self.repo.fetch(remote_name, settings, progress)?;
        let commits = self.update_commits()?;

        if *auto_merge {
            info!(path = ?self.path, "auto merge is enabled, trying to merge");
            if *hard_reset {
                info!(path = ?self.path, base = %commits.common_base, "hard reset is enabled, resetting");
                self.repo.hard_reset(commits.common_base)?;
            }
            self.repo.fast_forward(remote_name, branch)?;
        }
        Ok(())
    }

    /// Returns true if the remote has commits the local branch lacks.
    ///
    /// # Errors
    ///
    /// See [`Supervisor::update_commits`].
    pub fn unpulled(&self) -> CoreResult<bool> {
        Ok(self.update_commits()?.unpulled())
    }

    /// Returns true if the local branch has commits the remote lacks.
    ///
    /// # Errors
    ///
    /// See [`Supervisor::update_commits`].
    pub fn unpushed(&self) -> CoreResult<bool> {
        Ok(self.update_commits()?.unpushed())
    }

    /// Returns the combined sync state.
    ///
    /// # Errors
    ///
    /// See [`Supervisor::update_commits`].
    pub fn sync_state(&self) -> CoreResult<SyncState> {
        Ok(self.update_commits()?.sync_state())
    }
}
