//! # Knot Repo
//!
//! Repository discovery, layout, and bootstrap for Knot.
//!
//! A repository is a worktree directory containing a `.knot` metadata
//! directory. This crate owns everything about that directory except its
//! object contents: finding it from a nested path, creating the on-disk
//! skeleton, mapping logical paths like `refs/heads` to filesystem paths,
//! and loading the versioned configuration record.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod repository;

pub use config::{Config, SUPPORTED_FORMAT_VERSION};
pub use error::{RepoError, Result};
pub use repository::{Repository, KNOT_DIR};
