//! Translation layer between namespace operations and the backing
//! store.
//!
//! Maps store-level outcomes to namespace error kinds: a missing
//! intermediate component becomes `PathNotFound`, an existing create
//! target becomes `AlreadyExists`, allocation failure becomes
//! `OutOfMemory`. Sequences of adapter calls are not transactional:
//! ancestors created before a leaf-level `AlreadyExists` stay in the
//! store.

use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::path;
use crate::store::{Container, Disposition, Store, StoreError};

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Error::PathNotFound,
            StoreError::OutOfMemory => Error::OutOfMemory,
            StoreError::Other(err) => Error::Store(err),
        }
    }
}

/// Thin, cheaply clonable wrapper over an injected store.
#[derive(Clone)]
pub struct StoreAdapter {
    store: Arc<dyn Store>,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates the entry at `path` and all missing ancestors.
    ///
    /// If the leaf already existed, the opened container is released
    /// and `AlreadyExists` is reported; ancestors created along the
    /// way are kept (the store's ancestor autocreate is not
    /// transactional).
    pub fn create_entry(&self, path: &str) -> Result<()> {
        match self.store.create_container(path::strip_leading(path))? {
            Disposition::Created => Ok(()),
            Disposition::Existing => Err(Error::AlreadyExists),
        }
    }

    /// Opens the entry at `path`.
    pub fn open_entry(&self, path: &str) -> Result<Box<dyn Container>> {
        Ok(self.store.open_container(path::strip_leading(path))?)
    }

    /// Deletes exactly one child of `parent`. `name` must be
    /// non-empty (enforced by the caller layer); leading separators
    /// are stripped first.
    pub fn delete_entry(&self, parent: &str, name: &str) -> Result<()> {
        let container = self.open_entry(parent)?;
        container.delete_child(path::strip_leading(name))?;
        Ok(())
    }

    /// Immediate child names of `path`, in store-native order.
    ///
    /// Folder children and leaf-item children are not distinguished
    /// here; both show up in the listing.
    pub fn list_children(&self, path: &str) -> Result<Vec<String>> {
        let container = self.open_entry(path)?;
        Ok(container.child_names()?)
    }
}
