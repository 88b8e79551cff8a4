//! Immutable snapshots of a folder's children.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::adapter::StoreAdapter;
use crate::cursor::Cursor;
use crate::errors::{Error, Result};
use crate::folder::Folder;

/// Position-or-name selector for collection indexing.
#[derive(Debug, Clone)]
pub enum Selector {
    /// 1-based position inside the snapshot.
    ByPosition(i64),
    /// Child name, resolved against the live store.
    ByName(String),
}

/// A point-in-time snapshot of the immediate child names of one
/// folder.
///
/// The name list is captured once at construction and never mutated;
/// clones share it. No store resource stays open after construction,
/// and the collection owns no folder handles: children are
/// materialized on demand.
#[derive(Clone)]
pub struct FolderCollection {
    inner: Arc<Inner>,
}

struct Inner {
    adapter: StoreAdapter,
    parent: String,
    names: Vec<String>,
}

impl fmt::Debug for FolderCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderCollection")
            .field("parent", &self.inner.parent)
            .field("names", &self.inner.names)
            .finish()
    }
}

impl FolderCollection {
    /// Captures the snapshot for `parent`.
    pub(crate) fn snapshot(adapter: StoreAdapter, parent: &str) -> Result<FolderCollection> {
        let names = adapter.list_children(parent)?;
        debug!("captured {} children of {}", names.len(), parent);
        Ok(FolderCollection {
            inner: Arc::new(Inner {
                adapter,
                parent: parent.to_string(),
                names,
            }),
        })
    }

    /// Size of the snapshot.
    pub fn count(&self) -> usize {
        self.inner.names.len()
    }

    /// The parent path the snapshot was captured from.
    pub fn parent_path(&self) -> &str {
        &self.inner.parent
    }

    /// The captured names, in store-native order.
    pub fn names(&self) -> &[String] {
        &self.inner.names
    }

    /// Resolves one child to a folder handle.
    ///
    /// Positions are 1-based and validated against the snapshot; a
    /// position outside `[1, count]` fails `InvalidArgument`. A name
    /// selector opens that name directly under the parent path
    /// regardless of whether it appears in the snapshot: the lookup
    /// is live, so it can diverge from the captured list. Either way
    /// the open happens at call time and fails `PathNotFound` if the
    /// child is gone from the store.
    pub fn item(&self, selector: Selector) -> Result<Folder> {
        match selector {
            Selector::ByName(name) => {
                Folder::open(self.inner.adapter.clone(), &self.inner.parent, &name)
            }
            Selector::ByPosition(pos) => {
                if pos < 1 || pos as usize > self.inner.names.len() {
                    return Err(Error::InvalidArgument);
                }
                self.open_at(pos as usize - 1)
            }
        }
    }

    /// A new cursor over this snapshot, positioned at the start.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.clone())
    }

    pub(crate) fn open_at(&self, index: usize) -> Result<Folder> {
        Folder::open(
            self.inner.adapter.clone(),
            &self.inner.parent,
            &self.inner.names[index],
        )
    }
}
