//! CLI commands.

pub mod make_config;
pub mod reconcile;
