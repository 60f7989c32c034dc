//! Logging setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    #[value(name = "ERROR")]
    Error,
    /// Errors and warnings
    #[value(name = "WARNING")]
    Warning,
    /// Progress of each repository
    #[value(name = "INFO")]
    Info,
    /// Everything
    #[value(name = "DEBUG")]
    Debug,
}

impl LogLevel {
    /// Returns the matching `EnvFilter` directive.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to `log_file` when
/// given, stderr otherwise.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("can't open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        assert_eq!(LogLevel::Error.directive(), "error");
        assert_eq!(LogLevel::Warning.directive(), "warn");
        assert_eq!(LogLevel::Info.directive(), "info");
        assert_eq!(LogLevel::Debug.directive(), "debug");
    }
}
