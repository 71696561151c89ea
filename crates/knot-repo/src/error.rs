//! Repository error types.

use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No repository was found at or above the requested path.
    #[error("not a knot repository (or any of the parent directories): {0}")]
    NotFound(String),

    /// A path that must be a directory exists as something else.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// The metadata directory already holds repository state.
    #[error("refusing to reinitialize non-empty metadata directory: {0}")]
    AlreadyInitialized(String),

    /// The configuration file could not be parsed at all.
    #[error("corrupt configuration file: {0}")]
    ConfigCorrupt(String),

    /// The configuration file parsed but holds an invalid record.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The repository uses a format this version cannot read.
    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(i64),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
