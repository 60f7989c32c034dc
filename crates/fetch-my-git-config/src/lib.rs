//! Configuration management for fetch-my-git.
//!
//! This crate handles the INI configuration file: loading the supervised
//! repository entries and rendering generated configurations.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_CONFIG_PATH, DEFAULT_SECTION, load_config, parse_config};
pub use schema::{DiscoveredRepository, EntryDefaults, GeneratedConfig, RepositoryEntry, expand_home};
