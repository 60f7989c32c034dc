//! Config generation mode.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use fetch_my_git_core::{CoreError, make_config};
use tracing::error;

/// Arguments for generating a config.
#[derive(Debug, Args)]
pub struct MakeConfigArgs {
    /// Make config from passed directories. Sub-directories of these paths
    /// are scanned for git repositories, each one is listed in the config
    /// printed to stdout
    #[arg(long = "make-config", num_args = 1.., value_name = "PATH")]
    pub paths: Option<Vec<PathBuf>>,

    /// Write local paths under this directory as ~/... in the generated config
    #[arg(long, value_name = "PATH", requires = "paths")]
    pub base_dir: Option<PathBuf>,
}

/// Scans `paths` and prints the resulting config to stdout.
pub fn run(paths: &[PathBuf], base_dir: Option<&Path>) -> Result<ExitCode> {
    let config = match make_config(paths, base_dir) {
        Ok(config) => config,
        Err(e @ CoreError::NotADirectory(_)) => {
            error!("{e}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e).context("failed to scan directories"),
    };

    let mut stdout = std::io::stdout().lock();
    config
        .write_to(&mut stdout)
        .context("failed to write config")?;
    Ok(ExitCode::SUCCESS)
}
