use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use Canopy::config::CanopyConfig;
use Canopy::folder::Folder;
use Canopy::store::FileStore;
use Canopy::StoreAdapter;

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("canopy-{}-{}-{}", prefix, pid, t))
}

fn open_root(root: &std::path::Path, cfg: &CanopyConfig) -> Result<Folder> {
    let store = FileStore::open_with_config(root, cfg)?;
    let adapter = StoreAdapter::new(Arc::new(store));
    Ok(Folder::root(adapter)?)
}

#[test]
fn init_create_reopen_persists() -> Result<()> {
    let root = unique_root("persist");
    let cfg = CanopyConfig::default();

    // 1) init + populate
    FileStore::init_with_config(&root, &cfg)?;
    {
        let ns = open_root(&root, &cfg)?;
        ns.create_subfolder("A\\B")?;
        ns.create_subfolder("C")?;
    }

    // 2) reopen: the tree must be back, in the same order
    {
        let ns = open_root(&root, &cfg)?;
        let snap = ns.subfolders(0)?;
        assert_eq!(snap.count(), 2);
        assert_eq!(snap.names(), ["A".to_string(), "C".to_string()]);
        assert_eq!(ns.subfolder("A\\B")?.name(), "B");
    }

    // 3) deletes persist too
    {
        let ns = open_root(&root, &cfg)?;
        ns.subfolder("A")?.delete_subfolder("B", 0)?;
    }
    {
        let ns = open_root(&root, &cfg)?;
        assert_eq!(ns.subfolder("A")?.subfolders(0)?.count(), 0);
    }
    Ok(())
}

#[test]
fn init_twice_fails() -> Result<()> {
    let root = unique_root("reinit");
    let cfg = CanopyConfig::default();

    FileStore::init_with_config(&root, &cfg)?;
    assert!(FileStore::init_with_config(&root, &cfg).is_err());
    Ok(())
}

#[test]
fn open_without_init_fails() {
    let root = unique_root("noinit");
    fs::create_dir_all(&root).unwrap();
    assert!(FileStore::open_with_config(&root, &CanopyConfig::default()).is_err());
}

#[test]
fn second_writer_is_locked_out() -> Result<()> {
    let root = unique_root("lock");
    let cfg = CanopyConfig::default();
    FileStore::init_with_config(&root, &cfg)?;

    let first = FileStore::open_with_config(&root, &cfg)?;
    assert!(FileStore::open_with_config(&root, &cfg).is_err());

    // Releasing the first writer frees the lock.
    drop(first);
    let again = FileStore::open_with_config(&root, &cfg)?;
    assert_eq!(again.container_count(), 0);
    Ok(())
}

#[test]
fn corrupted_body_is_rejected_on_open() -> Result<()> {
    let root = unique_root("crc");
    let cfg = CanopyConfig::default();
    FileStore::init_with_config(&root, &cfg)?;
    {
        let ns = open_root(&root, &cfg)?;
        ns.create_subfolder("Precious")?;
    }

    // Flip one byte of the stored body; the CRC check must refuse it.
    let file = root.join(&cfg.store_file);
    let mut bytes = fs::read(&file)?;
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&file, &bytes)?;

    assert!(FileStore::open_with_config(&root, &cfg).is_err());
    Ok(())
}

#[test]
fn custom_store_file_name() -> Result<()> {
    let root = unique_root("custom");
    let cfg = CanopyConfig::default().with_store_file("ns.tree");

    FileStore::init_with_config(&root, &cfg)?;
    assert!(root.join("ns.tree").exists());

    let ns = open_root(&root, &cfg)?;
    ns.create_subfolder("A")?;
    assert_eq!(ns.subfolders(0)?.count(), 1);
    Ok(())
}

#[test]
fn fsync_disabled_still_round_trips() -> Result<()> {
    let root = unique_root("nofsync");
    let cfg = CanopyConfig::default().with_data_fsync(false);

    FileStore::init_with_config(&root, &cfg)?;
    {
        let ns = open_root(&root, &cfg)?;
        ns.create_subfolder("Fast")?;
    }
    let ns = open_root(&root, &cfg)?;
    assert_eq!(ns.subfolders(0)?.names(), ["Fast".to_string()]);
    Ok(())
}

#[test]
fn container_count_tracks_mutations() -> Result<()> {
    let root = unique_root("count");
    let cfg = CanopyConfig::default();
    FileStore::init_with_config(&root, &cfg)?;

    let store = Arc::new(FileStore::open_with_config(&root, &cfg)?);
    let ns = Folder::root(StoreAdapter::new(store.clone()))?;

    ns.create_subfolder("A\\B")?;
    ns.create_subfolder("C")?;
    assert_eq!(store.container_count(), 3);

    ns.delete_subfolder("C", 0)?;
    assert_eq!(store.container_count(), 2);

    // Deleting a parent detaches its subtree with it.
    ns.delete_subfolder("A", 0)?;
    assert_eq!(store.container_count(), 0);
    Ok(())
}
