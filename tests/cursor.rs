use anyhow::Result;
use std::sync::Arc;

use Canopy::errors::Error;
use Canopy::folder::Folder;
use Canopy::store::MemStore;
use Canopy::StoreAdapter;

fn root_with_children(names: &[&str]) -> Result<Folder> {
    let adapter = StoreAdapter::new(Arc::new(MemStore::new()));
    let root = Folder::root(adapter)?;
    for name in names {
        root.create_subfolder(name)?;
    }
    Ok(root)
}

#[test]
fn next_walks_the_snapshot_in_chunks() -> Result<()> {
    let root = root_with_children(&["A", "B", "C"])?;
    let mut cur = root.subfolders(0)?.cursor();

    // 1) a full chunk
    let (items, fully) = cur.next(2)?;
    assert_eq!(items.len(), 2);
    assert!(fully);
    assert_eq!(items[0].name(), "A");
    assert_eq!(items[1].name(), "B");

    // 2) a short tail
    let (items, fully) = cur.next(2)?;
    assert_eq!(items.len(), 1);
    assert!(!fully);
    assert_eq!(items[0].name(), "C");

    // 3) exhausted
    let (items, fully) = cur.next(1)?;
    assert!(items.is_empty());
    assert!(!fully);
    Ok(())
}

#[test]
fn next_zero_fetches_nothing_fully() -> Result<()> {
    let root = root_with_children(&["A"])?;
    let mut cur = root.subfolders(0)?.cursor();

    let (items, fully) = cur.next(0)?;
    assert!(items.is_empty());
    assert!(fully);
    assert_eq!(cur.position(), 0);
    Ok(())
}

#[test]
fn exhaustion_after_consuming_everything() -> Result<()> {
    let root = root_with_children(&["A", "B"])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();

    let (items, fully) = cur.next(snap.count())?;
    assert_eq!(items.len(), snap.count());
    assert!(fully);

    let (items, fully) = cur.next(1)?;
    assert!(items.is_empty());
    assert!(!fully);
    Ok(())
}

#[test]
fn skip_clamps_at_the_end() -> Result<()> {
    let root = root_with_children(&["A", "B", "C"])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();

    assert!(!cur.skip(snap.count() + 5));
    assert_eq!(cur.position(), snap.count());

    // Skipping nothing at the end is not a clamp.
    assert!(cur.skip(0));
    Ok(())
}

#[test]
fn skip_exact_count_is_not_a_clamp() -> Result<()> {
    let root = root_with_children(&["A", "B"])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();

    assert!(cur.skip(snap.count()));
    assert_eq!(cur.position(), snap.count());
    Ok(())
}

#[test]
fn skip_then_next_resumes_at_position() -> Result<()> {
    let root = root_with_children(&["A", "B", "C"])?;
    let mut cur = root.subfolders(0)?.cursor();

    assert!(cur.skip(1));
    let (items, _) = cur.next(1)?;
    assert_eq!(items[0].name(), "B");
    Ok(())
}

#[test]
fn reset_rewinds() -> Result<()> {
    let root = root_with_children(&["A", "B"])?;
    let mut cur = root.subfolders(0)?.cursor();

    cur.next(2)?;
    cur.reset();
    assert_eq!(cur.position(), 0);

    let (items, _) = cur.next(1)?;
    assert_eq!(items[0].name(), "A");
    Ok(())
}

#[test]
fn clone_starts_at_the_beginning_and_is_independent() -> Result<()> {
    let root = root_with_children(&["A", "B", "C"])?;
    let mut cur = root.subfolders(0)?.cursor();

    cur.next(2)?;
    let mut twin = cur.clone();
    assert_eq!(twin.position(), 0);

    // Advancing the twin does not move the original.
    twin.next(3)?;
    assert_eq!(cur.position(), 2);
    assert_eq!(twin.position(), 3);
    Ok(())
}

#[test]
fn cursor_keeps_the_snapshot_alive() -> Result<()> {
    let root = root_with_children(&["A", "B"])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();
    drop(snap);

    let (items, fully) = cur.next(2)?;
    assert_eq!(items.len(), 2);
    assert!(fully);
    Ok(())
}

#[test]
fn materialization_failure_reports_and_keeps_position() -> Result<()> {
    let root = root_with_children(&["A", "B", "C"])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();

    // B disappears between capture and iteration; opening it at
    // materialization time must fail.
    root.delete_subfolder("B", 0)?;

    let err = cur.next(3).unwrap_err();
    assert!(matches!(err, Error::PathNotFound));

    // A was materialized before the failure; the position stays where
    // the failing item started.
    assert_eq!(cur.position(), 1);

    // Retrying hits the same missing name.
    assert!(matches!(cur.next(1), Err(Error::PathNotFound)));

    // Skipping past the hole resumes normal iteration.
    assert!(cur.skip(1));
    let (items, fully) = cur.next(1)?;
    assert_eq!(items[0].name(), "C");
    assert!(fully);
    Ok(())
}

#[test]
fn empty_snapshot_cursor() -> Result<()> {
    let root = root_with_children(&[])?;
    let snap = root.subfolders(0)?;
    let mut cur = snap.cursor();

    let (items, fully) = cur.next(1)?;
    assert!(items.is_empty());
    assert!(!fully);
    assert!(cur.skip(0));
    assert!(!cur.skip(1));
    Ok(())
}
