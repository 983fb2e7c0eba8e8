//! On-disk tests for the local state store.
//!
//! The in-process unit tests cover behavior against an in-memory
//! database; these verify the file-backed lifecycle: creation, schema
//! initialization, and non-destructive reopening.

use vtix::state::{StateStore, WatchOutcome};

#[test]
fn fresh_file_gets_the_full_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.sqlite");

    let store = StateStore::open(&path).unwrap();
    assert_eq!(store.version().unwrap(), Some(1));
    assert!(path.exists());

    // All three tables are usable immediately.
    assert!(store.watched().unwrap().is_empty());
    assert_eq!(store.setting("version").unwrap().as_deref(), Some("1"));
    store
        .record_time_entry("TT9886", "2024-03-01 09:00:00", "2024-03-01 10:30:00", true)
        .unwrap();
}

#[test]
fn reopening_preserves_existing_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.sqlite");

    {
        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.watch("TT9886").unwrap(), WatchOutcome::Added);
        store.set_setting("last_user", "19x8261").unwrap();
    }

    let store = StateStore::open(&path).unwrap();
    assert_eq!(store.version().unwrap(), Some(1));
    assert!(store.is_watching("TT9886").unwrap());
    assert_eq!(store.watched().unwrap(), vec!["TT9886".to_string()]);
    assert_eq!(store.setting("last_user").unwrap().as_deref(), Some("19x8261"));
}
