//! In-memory store: a mutex-guarded node tree.
//!
//! The substitute used by tests, and a scratch namespace for callers
//! that need no durability. Cloning a `MemStore` shares the tree.

use std::sync::{Arc, Mutex};

use super::tree::Node;
use super::{Container, Disposition, Store, StoreError};

#[derive(Clone, Default)]
pub struct MemStore {
    tree: Arc<Mutex<Node>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers currently in the tree (root excluded).
    pub fn container_count(&self) -> usize {
        self.tree.lock().unwrap().paths().len()
    }
}

impl Store for MemStore {
    fn create_container(&self, path: &str) -> Result<Disposition, StoreError> {
        let mut tree = self.tree.lock().unwrap();
        if tree.ensure(path) {
            Ok(Disposition::Created)
        } else {
            Ok(Disposition::Existing)
        }
    }

    fn open_container(&self, path: &str) -> Result<Box<dyn Container>, StoreError> {
        let tree = self.tree.lock().unwrap();
        if tree.find(path).is_none() {
            return Err(StoreError::NotFound);
        }
        drop(tree);
        Ok(Box::new(MemContainer {
            tree: Arc::clone(&self.tree),
            path: path.to_string(),
        }))
    }
}

struct MemContainer {
    tree: Arc<Mutex<Node>>,
    path: String,
}

impl Container for MemContainer {
    fn delete_child(&self, name: &str) -> Result<(), StoreError> {
        let mut tree = self.tree.lock().unwrap();
        let node = tree.find_mut(&self.path).ok_or(StoreError::NotFound)?;
        node.remove_child(name)
    }

    fn child_names(&self) -> Result<Vec<String>, StoreError> {
        let tree = self.tree.lock().unwrap();
        let node = tree.find(&self.path).ok_or(StoreError::NotFound)?;
        Ok(node.child_names())
    }
}
