#![allow(non_snake_case)]

// Foundation modules
pub mod config;
pub mod consts;
pub mod errors;
pub mod path;

// Store layer (trait + bundled implementations)
pub mod store; // src/store/{mod,tree,mem,file}.rs

// Namespace core
pub mod adapter;
pub mod collection;
pub mod cursor;
pub mod folder;

// Administration CLI
pub mod cli;

// Convenience re-exports
pub use adapter::StoreAdapter;
pub use collection::{FolderCollection, Selector};
pub use config::CanopyConfig;
pub use cursor::Cursor;
pub use errors::{Error, Result};
pub use folder::Folder;
pub use store::{Container, Disposition, FileStore, MemStore, Store, StoreError};
