//! Fetch options and remote callbacks.

use git2::{AutotagOption, Cred, CredentialType, FetchOptions, FetchPrune, RemoteCallbacks};
use tracing::debug;

/// Credential lookups allowed per transfer before giving up.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Options applied to every fetch and clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSettings {
    /// Refspecs to fetch. Empty means the remote's configured refspecs.
    pub refspecs: Vec<String>,

    /// Remove remote-tracking refs that no longer exist on the remote.
    pub prune: bool,

    /// Download every tag instead of only those pointing into fetched history.
    pub all_tags: bool,
}

impl FetchSettings {
    /// Builds libgit2 fetch options, wiring in credentials and the progress hook.
    pub(crate) fn fetch_options<'a>(
        &self,
        progress: Option<&'a mut dyn FnMut(&FetchProgress)>,
    ) -> FetchOptions<'a> {
        let mut options = FetchOptions::new();
        options.remote_callbacks(remote_callbacks(progress));
        if self.prune {
            options.prune(FetchPrune::On);
        }
        if self.all_tags {
            options.download_tags(AutotagOption::All);
        }
        options
    }
}

/// Transfer statistics reported while fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    /// Objects received so far.
    pub received_objects: usize,
    /// Objects the remote announced.
    pub total_objects: usize,
    /// Objects indexed so far.
    pub indexed_objects: usize,
    /// Bytes received so far.
    pub received_bytes: usize,
}

impl From<&git2::Progress<'_>> for FetchProgress {
    fn from(stats: &git2::Progress<'_>) -> Self {
        Self {
            received_objects: stats.received_objects(),
            total_objects: stats.total_objects(),
            indexed_objects: stats.indexed_objects(),
            received_bytes: stats.received_bytes(),
        }
    }
}

fn remote_callbacks<'a>(
    progress: Option<&'a mut dyn FnMut(&FetchProgress)>,
) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();

    let mut attempts = 0;
    callbacks.credentials(move |url, username_from_url, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }
        debug!(url, ?allowed, attempts, "credentials requested");

        if allowed.contains(CredentialType::SSH_KEY)
            && let Some(user) = username_from_url
        {
            return Cred::ssh_key_from_agent(user);
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            let config = git2::Config::open_default()?;
            return Cred::credential_helper(&config, url, username_from_url);
        }
        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(username_from_url.unwrap_or("git"));
        }
        Cred::default()
    });

    if let Some(hook) = progress {
        callbacks.transfer_progress(move |stats| {
            hook(&FetchProgress::from(&stats));
            true
        });
    }

    callbacks
}
