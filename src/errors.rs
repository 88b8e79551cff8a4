//! Error taxonomy of the namespace core.
//!
//! Every operation returns one of these catalogued outcomes; there is
//! no retry or local recovery inside the core. Partial work performed
//! before a failure (e.g. ancestors created before a leaf-creation
//! error) is not undone.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input was absent or empty.
    #[error("invalid argument: required input is missing or empty")]
    InvalidArgument,

    /// A name violates the separator rules (trailing separator on a
    /// folder target).
    #[error("invalid name: trailing separator is not permitted")]
    InvalidName,

    /// The target or one of its ancestors does not exist where
    /// existence was required.
    #[error("path not found")]
    PathNotFound,

    /// The create target is already present.
    #[error("folder already exists")]
    AlreadyExists,

    /// Delete was requested with an empty name.
    #[error("access denied")]
    AccessDenied,

    /// The backing store reported an allocation failure.
    #[error("out of memory in backing store")]
    OutOfMemory,

    /// The operation is recognized but not built.
    #[error("not implemented")]
    NotImplemented,

    /// A store-specific failure, surfaced verbatim.
    #[error("store failure: {0}")]
    Store(anyhow::Error),
}
