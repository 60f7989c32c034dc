//! CLI definition.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::logging::LogLevel;

/// Keep a set of local git clones fetched and in sync with their remotes.
#[derive(Debug, Parser)]
#[command(name = "fetch-my-git")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub make_config: commands::make_config::MakeConfigArgs,

    #[command(flatten)]
    pub reconcile: commands::reconcile::ReconcileArgs,

    /// Path to log file, default log destination is stderr
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Verbosity level of logs
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Runs the selected mode.
    pub fn run(self) -> Result<ExitCode> {
        match self.make_config.paths {
            Some(ref paths) => {
                commands::make_config::run(paths, self.make_config.base_dir.as_deref())
            }
            None => commands::reconcile::run(&self.reconcile),
        }
    }
}
