//! Durable single-file store.
//!
//! Layout of `<root>/tree.canopy` (LE):
//!   MAGIC8 = "CANOPYT1"
//!   u32 version  = 1
//!   u32 count    (number of path entries)
//!   u64 reserved (low 32 bits: CRC32 over [version][count] + body)
//!   body: count entries of [u32 len][UTF-8 store path],
//!         parents before children, tree order.
//!
//! Every mutation rewrites the file atomically via tmp+rename; the
//! tmp file is fsynced when `data_fsync` is on, and the parent
//! directory is fsynced best-effort after the rename. `<root>/LOCK`
//! is held exclusively (advisory, fs2) for the store's lifetime, so a
//! second writer on the same root fails to open.

use anyhow::{anyhow, Context, Result};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher as Crc32;
use fs2::FileExt;
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::CanopyConfig;
use crate::consts::{LOCK_FILE, TREE_MAGIC, TREE_VERSION};

use super::tree::Node;
use super::{Container, Disposition, Store, StoreError};

pub struct FileStore {
    shared: Arc<Shared>,
}

struct Shared {
    tree: Mutex<Node>,
    file: PathBuf,
    tmp: PathBuf,
    data_fsync: bool,
    lock: std::fs::File,
}

impl Drop for Shared {
    fn drop(&mut self) {
        // Unlock errors on drop are ignored deliberately.
        let _ = self.lock.unlock();
    }
}

impl FileStore {
    /// Initializes a new store root directory with an empty tree.
    /// Fails if a snapshot file already exists there.
    pub fn init(root: &Path) -> Result<()> {
        Self::init_with_config(root, &CanopyConfig::from_env())
    }

    pub fn init_with_config(root: &Path, cfg: &CanopyConfig) -> Result<()> {
        if !root.exists() {
            fs::create_dir_all(root)
                .with_context(|| format!("create root {}", root.display()))?;
        }
        let file = root.join(&cfg.store_file);
        if file.exists() {
            return Err(anyhow!("store already exists at {}", file.display()));
        }
        let tmp = root.join(format!("{}.tmp", cfg.store_file));
        write_tree_file(&file, &tmp, &Node::new(), cfg.data_fsync)?;
        info!("initialized store at {}", file.display());
        Ok(())
    }

    /// Opens an initialized store root, taking the exclusive lock.
    pub fn open(root: &Path) -> Result<FileStore> {
        Self::open_with_config(root, &CanopyConfig::from_env())
    }

    pub fn open_with_config(root: &Path, cfg: &CanopyConfig) -> Result<FileStore> {
        let lock_path = root.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("open lock file {}", lock_path.display()))?;
        lock.try_lock_exclusive()
            .with_context(|| format!("store at {} is locked by another process", root.display()))?;

        let file = root.join(&cfg.store_file);
        let tree = load_tree(&file)?;
        debug!("loaded {} containers from {}", tree.paths().len(), file.display());

        Ok(FileStore {
            shared: Arc::new(Shared {
                tree: Mutex::new(tree),
                tmp: root.join(format!("{}.tmp", cfg.store_file)),
                file,
                data_fsync: cfg.data_fsync,
                lock,
            }),
        })
    }

    /// Number of containers currently persisted (root excluded).
    pub fn container_count(&self) -> usize {
        self.shared.tree.lock().unwrap().paths().len()
    }
}

impl Store for FileStore {
    fn create_container(&self, path: &str) -> Result<Disposition, StoreError> {
        let mut tree = self.shared.tree.lock().unwrap();
        if tree.ensure(path) {
            self.shared.persist(&tree)?;
            Ok(Disposition::Created)
        } else {
            Ok(Disposition::Existing)
        }
    }

    fn open_container(&self, path: &str) -> Result<Box<dyn Container>, StoreError> {
        let tree = self.shared.tree.lock().unwrap();
        if tree.find(path).is_none() {
            return Err(StoreError::NotFound);
        }
        drop(tree);
        Ok(Box::new(FileContainer {
            shared: Arc::clone(&self.shared),
            path: path.to_string(),
        }))
    }
}

struct FileContainer {
    shared: Arc<Shared>,
    path: String,
}

impl Container for FileContainer {
    fn delete_child(&self, name: &str) -> Result<(), StoreError> {
        let mut tree = self.shared.tree.lock().unwrap();
        let node = tree.find_mut(&self.path).ok_or(StoreError::NotFound)?;
        node.remove_child(name)?;
        self.shared.persist(&tree)?;
        Ok(())
    }

    fn child_names(&self) -> Result<Vec<String>, StoreError> {
        let tree = self.shared.tree.lock().unwrap();
        let node = tree.find(&self.path).ok_or(StoreError::NotFound)?;
        Ok(node.child_names())
    }
}

impl Shared {
    fn persist(&self, tree: &Node) -> Result<(), StoreError> {
        write_tree_file(&self.file, &self.tmp, tree, self.data_fsync).map_err(StoreError::Other)
    }
}

// -------- snapshot file I/O --------

fn write_tree_file(file: &Path, tmp: &Path, tree: &Node, fsync: bool) -> Result<()> {
    let paths = tree.paths();
    let mut body = Vec::new();
    for p in &paths {
        body.write_u32::<LittleEndian>(p.len() as u32)?;
        body.extend_from_slice(p.as_bytes());
    }
    let count = paths.len() as u32;
    let crc = compute_tree_crc(TREE_VERSION, count, &body);

    let _ = fs::remove_file(tmp); // best-effort
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)
        .with_context(|| format!("open store tmp {}", tmp.display()))?;

    f.write_all(TREE_MAGIC)?;
    f.write_u32::<LittleEndian>(TREE_VERSION)?;
    f.write_u32::<LittleEndian>(count)?;
    f.write_u64::<LittleEndian>(crc as u64)?;
    f.write_all(&body)?;
    if fsync {
        f.sync_all()?;
    }

    fs::rename(tmp, file)
        .with_context(|| format!("rename {} -> {}", tmp.display(), file.display()))?;
    let _ = fsync_parent_dir(file);
    Ok(())
}

fn load_tree(file: &Path) -> Result<Node> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(file)
        .with_context(|| format!("open store file {}", file.display()))?;

    let mut magic = [0u8; 8];
    f.read_exact(&mut magic)?;
    if &magic != TREE_MAGIC {
        return Err(anyhow!("bad store magic in {}", file.display()));
    }
    let version = f.read_u32::<LittleEndian>()?;
    if version != TREE_VERSION {
        return Err(anyhow!(
            "unsupported store version {} in {}",
            version,
            file.display()
        ));
    }
    let count = f.read_u32::<LittleEndian>()?;
    let stored_crc = f.read_u64::<LittleEndian>()?;

    let mut body = Vec::new();
    f.read_to_end(&mut body)?;

    // CRC check, if set in the file (stored_crc != 0).
    if stored_crc != 0 {
        let calc = compute_tree_crc(version, count, &body);
        if calc as u64 != stored_crc {
            return Err(anyhow!(
                "store CRC mismatch in {} (stored={}, calc={})",
                file.display(),
                stored_crc,
                calc
            ));
        }
    }

    let mut tree = Node::new();
    let mut off = 0usize;
    for _ in 0..count {
        if off + 4 > body.len() {
            return Err(anyhow!("truncated store body in {}", file.display()));
        }
        let len = LittleEndian::read_u32(&body[off..off + 4]) as usize;
        off += 4;
        if off + len > body.len() {
            return Err(anyhow!("truncated store entry in {}", file.display()));
        }
        let path = std::str::from_utf8(&body[off..off + len])
            .with_context(|| format!("invalid UTF-8 path in {}", file.display()))?;
        off += len;
        tree.ensure(path);
    }
    Ok(tree)
}

/// CRC over [version u32][count u32] + body. Magic and the reserved
/// field are excluded (reserved carries the CRC itself).
fn compute_tree_crc(version: u32, count: u32, body: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    let mut buf4 = [0u8; 4];
    LittleEndian::write_u32(&mut buf4, version);
    hasher.update(&buf4);
    LittleEndian::write_u32(&mut buf4, count);
    hasher.update(&buf4);
    hasher.update(body);
    hasher.finalize()
}

// Best-effort fsync of the parent directory after rename (Unix only).
#[cfg(unix)]
fn fsync_parent_dir(p: &Path) -> std::io::Result<()> {
    use std::fs::File;
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_parent_dir(_p: &Path) -> std::io::Result<()> {
    Ok(())
}
