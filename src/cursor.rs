//! Stateful iteration over a collection snapshot.

use crate::collection::FolderCollection;
use crate::errors::Result;
use crate::folder::Folder;

/// A positioned iterator over a [`FolderCollection`] snapshot.
///
/// The cursor keeps its collection alive and materializes child
/// handles lazily as it advances. One cursor instance must not be
/// driven from multiple threads at once; clone it instead — cloned
/// cursors share the snapshot but hold independent positions.
#[derive(Debug)]
pub struct Cursor {
    collection: FolderCollection,
    position: usize,
}

impl Cursor {
    pub(crate) fn new(collection: FolderCollection) -> Cursor {
        Cursor {
            collection,
            position: 0,
        }
    }

    /// Materializes up to `n` child handles, advancing the position
    /// per successfully materialized item.
    ///
    /// Returns the handles plus a flag that is true iff exactly `n`
    /// were fetched. Each name is opened against the live store at
    /// call time; if one fails to open, that error is returned, the
    /// handles materialized before it are discarded, and the position
    /// stays where the failing item started.
    pub fn next(&mut self, n: usize) -> Result<(Vec<Folder>, bool)> {
        let remaining = self.collection.count() - self.position;
        let mut items = Vec::with_capacity(n.min(remaining));
        while items.len() < n && self.position < self.collection.count() {
            let folder = self.collection.open_at(self.position)?;
            items.push(folder);
            self.position += 1;
        }
        let fully_fetched = items.len() == n;
        Ok((items, fully_fetched))
    }

    /// Advances the position by `n`, clamped to the end of the
    /// snapshot. Returns true iff no clamping occurred.
    pub fn skip(&mut self, n: usize) -> bool {
        let count = self.collection.count();
        match self.position.checked_add(n) {
            Some(p) if p <= count => {
                self.position = p;
                true
            }
            _ => {
                self.position = count;
                false
            }
        }
    }

    /// Rewinds to the start of the snapshot.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// A new cursor over the same snapshot, positioned at the start.
    ///
    /// The source cursor's position is never copied: the fresh cursor
    /// begins at the first item. (An inherent method rather than the
    /// `Clone` trait, precisely because it does not duplicate state.)
    pub fn clone(&self) -> Cursor {
        Cursor::new(self.collection.clone())
    }

    /// Current position, in `[0, count]`.
    pub fn position(&self) -> usize {
        self.position
    }
}
