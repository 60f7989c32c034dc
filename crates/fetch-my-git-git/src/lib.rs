//! Git abstraction layer for fetch-my-git.
//!
//! This crate provides the working copy operations the supervisor needs:
//! - Opening and cloning
//! - Remote inspection and fetching
//! - Branch tips and merge bases
//! - Fast-forward merges and hard resets

mod callbacks;
mod error;
mod repository;

pub use callbacks::{FetchProgress, FetchSettings};
pub use error::{GitError, GitResult};
pub use git2::Oid;
pub use repository::WorkingCopy;
