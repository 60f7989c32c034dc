//! Git working copy wrapper.

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, ResetType};
use tracing::{debug, info};

use crate::{FetchProgress, FetchSettings, GitError, GitResult};

/// A non-bare Git repository with a working directory.
pub struct WorkingCopy {
    inner: Git2Repo,
}

impl WorkingCopy {
    /// Opens the working copy at exactly the given path.
    ///
    /// Parent directories are not searched.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if the path holds no repository and
    /// [`GitError::BareRepository`] if the repository has no working directory.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NotARepo(path.to_path_buf())
            } else {
                GitError::Git2(e)
            }
        })?;

        if inner.is_bare() {
            return Err(GitError::BareRepository(path.to_path_buf()));
        }
        Ok(Self { inner })
    }

    /// Clones `url` into `path`.
    ///
    /// The new remote is called `remote_name` and `branch` is checked out.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Clone`] if the transfer or checkout fails.
    pub fn clone_into(
        url: &str,
        path: impl AsRef<Path>,
        remote_name: &str,
        branch: &str,
        settings: &FetchSettings,
    ) -> GitResult<Self> {
        let path = path.as_ref();
        info!(url, ?path, remote_name, branch, "cloning repository");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut builder = RepoBuilder::new();
        builder
            .fetch_options(settings.fetch_options(None))
            .branch(branch)
            .remote_create(|repo, _name, url| repo.remote(remote_name, url));

        let inner = builder.clone(url, path).map_err(|source| GitError::Clone {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { inner })
    }

    /// Returns the working directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the configured URL of a remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote does not exist or has no URL.
    pub fn remote_url(&self, remote_name: &str) -> GitResult<String> {
        let remote = self.find_remote(remote_name)?;
        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| GitError::RemoteUrlMissing(remote_name.to_string()))
    }

    /// Fetches from a remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote does not exist or the transfer fails.
    pub fn fetch(
        &self,
        remote_name: &str,
        settings: &FetchSettings,
        progress: Option<&mut dyn FnMut(&FetchProgress)>,
    ) -> GitResult<()> {
        let mut remote = self.find_remote(remote_name)?;
        let mut options = settings.fetch_options(progress);

        debug!(remote = remote_name, refspecs = ?settings.refspecs, "fetching");
        remote.fetch(settings.refspecs.as_slice(), Some(&mut options), None)?;

        let stats = remote.stats();
        debug!(
            remote = remote_name,
            received_objects = stats.received_objects(),
            received_bytes = stats.received_bytes(),
            "fetch complete"
        );
        Ok(())
    }

    /// Returns the commit a local branch points to.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BranchNotFound`] if the branch does not exist.
    pub fn branch_tip(&self, branch: &str) -> GitResult<Oid> {
        self.tip(branch, BranchType::Local)
    }

    /// Returns the commit a remote-tracking branch points to.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BranchNotFound`] if `<remote>/<branch>` does not exist.
    pub fn remote_branch_tip(&self, remote_name: &str, branch: &str) -> GitResult<Oid> {
        self.tip(&format!("{remote_name}/{branch}"), BranchType::Remote)
    }

    /// Returns the best common ancestor of two commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the commits share no history.
    pub fn merge_base(&self, one: Oid, two: Oid) -> GitResult<Oid> {
        Ok(self.inner.merge_base(one, two)?)
    }

    /// Returns the short name of the checked out branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] if HEAD is not on a branch.
    pub fn current_branch(&self) -> GitResult<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(GitError::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(GitError::DetachedHead)
    }

    /// Moves the current branch, index and working tree to `commit`,
    /// discarding everything in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit does not exist or the reset fails.
    pub fn hard_reset(&self, commit: Oid) -> GitResult<()> {
        let target = self.inner.find_commit(commit)?;
        self.inner
            .reset(target.as_object(), ResetType::Hard, None)?;
        info!(path = ?self.path(), %commit, "hard reset");
        Ok(())
    }

    /// Fast-forwards the current branch to `<remote>/<branch>`.
    ///
    /// Returns the new tip of the current branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NonFastForward`] if the current branch has commits
    /// the remote-tracking branch lacks. The branch is left untouched.
    pub fn fast_forward(&self, remote_name: &str, branch: &str) -> GitResult<Oid> {
        let target_name = format!("{remote_name}/{branch}");
        let target_ref = self
            .inner
            .find_branch(&target_name, BranchType::Remote)
            .map_err(|_| GitError::BranchNotFound(target_name.clone()))?
            .into_reference();
        let incoming = self.inner.reference_to_annotated_commit(&target_ref)?;
        let target = incoming.id();

        let (analysis, _) = self.inner.merge_analysis(&[&incoming])?;
        let head = self.inner.head()?;

        if analysis.is_up_to_date() {
            debug!(target = %target_name, "already up to date");
            return Ok(head.peel_to_commit()?.id());
        }
        if !analysis.is_fast_forward() {
            return Err(GitError::NonFastForward {
                branch: head.shorthand().unwrap_or("HEAD").to_string(),
                target: target_name,
            });
        }
        if !head.is_branch() {
            return Err(GitError::DetachedHead);
        }
        let head_name = head.name().ok_or(GitError::DetachedHead)?.to_string();

        let commit = self.inner.find_commit(target)?;
        self.inner
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;
        self.inner
            .find_reference(&head_name)?
            .set_target(target, &format!("fast-forward to {target_name}"))?;

        info!(branch = %head_name, %target, "fast-forwarded");
        Ok(target)
    }

    fn find_remote(&self, remote_name: &str) -> GitResult<git2::Remote<'_>> {
        self.inner.find_remote(remote_name).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::RemoteNotFound(remote_name.to_string())
            } else {
                GitError::Git2(e)
            }
        })
    }

    fn tip(&self, name: &str, kind: BranchType) -> GitResult<Oid> {
        let branch = self
            .inner
            .find_branch(name, kind)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;
        Ok(branch.get().peel_to_commit()?.id())
    }
}
