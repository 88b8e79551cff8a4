//! Backing-store contract for the namespace.
//!
//! The namespace core never talks to storage directly: it consumes an
//! injected [`Store`], which makes it possible to substitute an
//! in-memory tree for tests ([`MemStore`]) or a durable single-file
//! store ([`FileStore`]) without touching the core.
//!
//! Store paths are separator-delimited with no leading separator; the
//! empty string addresses the root container, which always exists.
//! Child enumeration yields immediate child names in store-native
//! order (not guaranteed sorted). Names never contain the separator;
//! an empty name is never a valid addressable entity.

pub mod file;
pub mod mem;
mod tree;

pub use file::FileStore;
pub use mem::MemStore;

use thiserror::Error;

/// Outcome of [`Store::create_container`] for the leaf container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The leaf container was created now.
    Created,
    /// The leaf container already existed.
    Existing,
}

/// Store-level failure conditions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The container, or an intermediate component of its path, does
    /// not exist.
    #[error("container not found")]
    NotFound,

    /// The store could not allocate memory.
    #[error("store out of memory")]
    OutOfMemory,

    /// Any other store-specific failure.
    #[error("{0}")]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for StoreError {
    fn from(e: anyhow::Error) -> Self {
        StoreError::Other(e)
    }
}

/// A hierarchical container store (external collaborator).
///
/// Individual calls are atomic at the store level; sequences of calls
/// are not transactional.
pub trait Store: Send + Sync {
    /// Creates the container at `path` together with all missing
    /// ancestors, reporting whether the leaf itself was created or
    /// already existed. Ancestors created along the way are kept
    /// either way.
    fn create_container(&self, path: &str) -> Result<Disposition, StoreError>;

    /// Opens the container at `path`. `NotFound` when the path or any
    /// intermediate component is missing.
    fn open_container(&self, path: &str) -> Result<Box<dyn Container>, StoreError>;
}

/// An open container handle.
///
/// Lookups through a container are live: they observe mutations made
/// after the container was opened.
pub trait Container: Send {
    /// Detaches exactly one immediate child by name. The bundled
    /// stores drop the child's subtree with it; no recursion happens
    /// beyond this single delete primitive.
    fn delete_child(&self, name: &str) -> Result<(), StoreError>;

    /// Immediate child names, in store-native order.
    fn child_names(&self) -> Result<Vec<String>, StoreError>;
}
