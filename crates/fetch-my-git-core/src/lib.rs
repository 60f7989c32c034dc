//! Core library for fetch-my-git.
//!
//! This crate provides the per-repository reconciliation logic and the
//! directory scan that generates configurations.

mod error;
mod generator;
mod status;
mod supervisor;

pub use error::{CoreError, CoreResult};
pub use generator::make_config;
pub use status::{CommitState, SyncState};
pub use supervisor::Supervisor;
