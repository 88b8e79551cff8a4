//! In-memory node tree shared by the bundled store implementations.
//!
//! Children live in insertion order; that order is what enumeration
//! yields. Empty path segments are skipped, so a store path of ""
//! resolves to the root node itself.

use crate::consts::SEP;

use super::StoreError;

/// One container node.
#[derive(Debug, Default, Clone)]
pub(crate) struct Node {
    children: Vec<(String, Node)>,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, c)| c)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, c)| c)
    }

    /// Resolves a store path; "" is the root node itself.
    pub(crate) fn find(&self, path: &str) -> Option<&Node> {
        let mut node = self;
        for seg in segments(path) {
            node = node.child(seg)?;
        }
        Some(node)
    }

    pub(crate) fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut node = self;
        for seg in segments(path) {
            node = node.child_mut(seg)?;
        }
        Some(node)
    }

    /// Creates the node at `path` with all missing ancestors.
    /// Returns true iff the leaf itself was created by this call.
    pub(crate) fn ensure(&mut self, path: &str) -> bool {
        let mut node = self;
        let mut created_leaf = false;
        for seg in segments(path) {
            let idx = match node.children.iter().position(|(n, _)| n.as_str() == seg) {
                Some(i) => {
                    created_leaf = false;
                    i
                }
                None => {
                    node.children.push((seg.to_string(), Node::new()));
                    created_leaf = true;
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx].1;
        }
        created_leaf
    }

    /// Detaches one immediate child; its subtree goes with it.
    pub(crate) fn remove_child(&mut self, name: &str) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::NotFound);
        }
        match self.children.iter().position(|(n, _)| n.as_str() == name) {
            Some(i) => {
                self.children.remove(i);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    pub(crate) fn child_names(&self) -> Vec<String> {
        self.children.iter().map(|(n, _)| n.clone()).collect()
    }

    /// All store paths in the tree, parents before children, in tree
    /// order. The root ("") is not included.
    pub(crate) fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, child) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}{}{}", prefix, SEP, name)
            };
            out.push(path.clone());
            child.collect_paths(&path, out);
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEP).filter(|s| !s.is_empty())
}
