//! Centralized configuration for Canopy.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env
//!   lookups.
//! - `CanopyConfig::from_env()` reads the `CANOPY_*` variables;
//!   fluent setters allow explicit overrides.

use std::fmt;

use crate::consts::TREE_FILE;

/// Top-level configuration for a file-backed namespace store.
#[derive(Clone, Debug)]
pub struct CanopyConfig {
    /// Whether to fsync the snapshot file on every mutation.
    /// Env: CANOPY_DATA_FSYNC (default true; "0|false|off|no" => false)
    pub data_fsync: bool,

    /// Snapshot file name inside the store root directory.
    /// Env: CANOPY_STORE_FILE (default "tree.canopy")
    pub store_file: String,
}

impl Default for CanopyConfig {
    fn default() -> Self {
        Self {
            data_fsync: true,
            store_file: TREE_FILE.to_string(),
        }
    }
}

impl CanopyConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("CANOPY_DATA_FSYNC") {
            let s = v.trim().to_ascii_lowercase();
            cfg.data_fsync = !(s == "0" || s == "false" || s == "off" || s == "no");
        }

        if let Ok(v) = std::env::var("CANOPY_STORE_FILE") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.store_file = s.to_string();
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_data_fsync(mut self, on: bool) -> Self {
        self.data_fsync = on;
        self
    }

    pub fn with_store_file<S: Into<String>>(mut self, name: S) -> Self {
        self.store_file = name.into();
        self
    }
}

impl fmt::Display for CanopyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CanopyConfig {{ data_fsync: {}, store_file: {} }}",
            self.data_fsync, self.store_file
        )
    }
}
