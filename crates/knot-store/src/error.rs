//! Store error types.

use thiserror::Error;

/// Errors that can occur during object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object is not in the store.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The framed byte form violates the `<tag> <len>\0<body>` structure.
    #[error("malformed object: {0}")]
    Malformed(String),

    /// The framing carries a type tag outside the closed set.
    #[error("unknown object type: {0}")]
    UnknownType(String),

    /// A variant body failed to parse.
    #[error("decode error: {0}")]
    Decode(String),

    /// A string is not a valid object identifier.
    #[error("invalid object id: {0}")]
    InvalidId(String),

    /// Retrieved bytes do not hash back to the requested identifier.
    #[error("object id mismatch: expected {expected}, found {found}")]
    IdMismatch {
        /// The identifier the caller asked for.
        expected: String,
        /// The digest of the bytes actually on disk.
        found: String,
    },

    /// A repository layout operation failed.
    #[error(transparent)]
    Repo(#[from] knot_repo::RepoError),

    /// An I/O error occurred, including compression stream failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
