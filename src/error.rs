//! Error type shared by the tree and the reference point set.

use thiserror::Error;

/// Errors returned by fallible operations in this crate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A point or rectangle argument cannot take part in the operation.
    ///
    /// Raised before any mutation or traversal starts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
