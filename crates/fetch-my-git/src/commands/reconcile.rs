//! Reconciliation mode: fetch, optionally merge, and report every repository.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use fetch_my_git_config::{DEFAULT_CONFIG_PATH, RepositoryEntry, load_config};
use fetch_my_git_core::{Supervisor, SyncState};
use fetch_my_git_git::{FetchProgress, FetchSettings};
use tracing::{debug, error, info, info_span};

/// Arguments for reconciling the configured repositories.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Path to config file
    #[arg(long, value_name = "PATH", env = "FETCH_MY_GIT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Remove remote-tracking branches that no longer exist on the remote
    #[arg(long)]
    pub prune: bool,
}

impl ReconcileArgs {
    fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            prune: self.prune,
            ..FetchSettings::default()
        }
    }
}

/// Runs the reconciliation loop.
///
/// A repository that fails is logged and skipped. Only an unreadable config
/// fails the run.
pub fn run(args: &ReconcileArgs) -> Result<ExitCode> {
    let entries = match load_config(&args.config) {
        Ok(entries) => entries,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(count = entries.len(), config = ?args.config, "loaded configuration");

    let settings = args.fetch_settings();
    for entry in entries {
        let span = info_span!("repo", name = %entry.name);
        let _enter = span.enter();

        match reconcile(entry, &settings) {
            Ok((path, state)) => println!("Repo {} is {state}", path.display()),
            Err(e) => error!("{e:#}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn reconcile(entry: RepositoryEntry, settings: &FetchSettings) -> Result<(PathBuf, SyncState)> {
    let local = entry.local.clone();
    let supervisor = Supervisor::open(entry, settings)
        .with_context(|| format!("can't supervise {local}"))?;

    let mut progress = |p: &FetchProgress| {
        debug!(
            received = p.received_objects,
            indexed = p.indexed_objects,
            total = p.total_objects,
            "fetch progress"
        );
    };
    supervisor
        .proceed(settings, Some(&mut progress))
        .with_context(|| format!("can't update {local}"))?;

    let state = supervisor
        .sync_state()
        .with_context(|| format!("can't read state of {local}"))?;
    Ok((supervisor.path().to_path_buf(), state))
}
