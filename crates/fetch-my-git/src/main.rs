//! fetch-my-git CLI - Keep local git clones fetched and in sync.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::init(cli.log_level, cli.log.as_deref())?;
    cli.run()
}
