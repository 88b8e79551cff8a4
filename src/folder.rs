//! Folder handles.
//!
//! A [`Folder`] addresses one path in the namespace. Many handles may
//! address the same path at once; cloning produces a new,
//! independently counted handle. Dropping a handle releases no store
//! state, and a handle caches no children: they are materialized on
//! demand.

use std::fmt;

use log::{debug, warn};

use crate::adapter::StoreAdapter;
use crate::collection::FolderCollection;
use crate::errors::{Error, Result};
use crate::path;

#[derive(Clone)]
pub struct Folder {
    adapter: StoreAdapter,
    path: String,
}

impl fmt::Debug for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Folder").field("path", &self.path).finish()
    }
}

impl Folder {
    /// Opens the root folder.
    pub fn root(adapter: StoreAdapter) -> Result<Folder> {
        Self::open(adapter, "", "")
    }

    /// Opens the folder at `parent` joined with `relative`.
    pub fn open(adapter: StoreAdapter, parent: &str, relative: &str) -> Result<Folder> {
        Self::build(adapter, parent, relative, false)
    }

    /// Creates the folder at `parent` joined with `relative`,
    /// together with any missing ancestors.
    pub fn create(adapter: StoreAdapter, parent: &str, relative: &str) -> Result<Folder> {
        Self::build(adapter, parent, relative, true)
    }

    fn build(adapter: StoreAdapter, parent: &str, relative: &str, create: bool) -> Result<Folder> {
        let folder_path = path::join(parent, relative)?;

        // Validate against the store up front; the container handle
        // itself is not kept.
        if create {
            adapter.create_entry(&folder_path)?;
            debug!("created folder {}", folder_path);
        } else {
            adapter.open_entry(&folder_path)?;
        }

        Ok(Folder {
            adapter,
            path: folder_path,
        })
    }

    /// Last segment of the path; the root folder is its own name.
    pub fn name(&self) -> &str {
        path::leaf(&self.path)
    }

    /// The handle's normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Opens an existing subfolder. `relative` must be non-empty.
    pub fn subfolder(&self, relative: &str) -> Result<Folder> {
        if relative.is_empty() {
            return Err(Error::InvalidArgument);
        }
        Self::open(self.adapter.clone(), &self.path, relative)
    }

    /// Creates a subfolder (and any missing ancestors).
    pub fn create_subfolder(&self, relative: &str) -> Result<Folder> {
        self.create_subfolder_with_access(relative, None)
    }

    /// Creates a subfolder, accepting an access descriptor for
    /// interface compatibility. Access descriptors are not applied:
    /// passing one emits a diagnostic and the call proceeds.
    pub fn create_subfolder_with_access(
        &self,
        relative: &str,
        access: Option<&str>,
    ) -> Result<Folder> {
        if relative.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if let Some(rule) = access {
            warn!("access descriptor {:?} is ignored", rule);
        }
        Self::create(self.adapter.clone(), &self.path, relative)
    }

    /// Deletes one immediate subfolder by name.
    pub fn delete_subfolder(&self, name: &str, flags: u32) -> Result<()> {
        if name.is_empty() {
            return Err(Error::AccessDenied);
        }
        if flags != 0 {
            warn!("unsupported flags {:#x}", flags);
        }
        self.adapter.delete_entry(&self.path, name)
    }

    /// Point-in-time snapshot of the immediate subfolders.
    ///
    /// No flag values are currently meaningful; non-zero flags are
    /// accepted and logged as unsupported.
    pub fn subfolders(&self, flags: u32) -> Result<FolderCollection> {
        if flags != 0 {
            warn!("unsupported flags {:#x}", flags);
        }
        FolderCollection::snapshot(self.adapter.clone(), &self.path)
    }

    // -------- leaf-item surface (recognized, not built) --------
    //
    // The namespace does not yet distinguish leaf items from folders;
    // these operations report that distinctly instead of guessing.

    /// Reads one leaf item's payload by relative path.
    pub fn item(&self, _relative: &str) -> Result<Vec<u8>> {
        Err(Error::NotImplemented)
    }

    /// Deep enumeration of leaf items.
    pub fn items(&self, _flags: u32) -> Result<Vec<String>> {
        Err(Error::NotImplemented)
    }

    /// Registers a leaf item under this folder.
    pub fn register_item(&self, _relative: &str, _payload: &[u8], _flags: u32) -> Result<()> {
        Err(Error::NotImplemented)
    }

    /// Deletes one leaf item by name.
    pub fn delete_item(&self, _name: &str, _flags: u32) -> Result<()> {
        Err(Error::NotImplemented)
    }

    /// Reads this folder's access rule.
    pub fn access_rule(&self, _info: u32) -> Result<String> {
        Err(Error::NotImplemented)
    }

    /// Replaces this folder's access rule.
    pub fn set_access_rule(&self, _rule: &str, _flags: u32) -> Result<()> {
        Err(Error::NotImplemented)
    }
}
