//! Storage adapter integration tests.
//!
//! These exercise the file backend on a real temporary directory with both
//! codecs, and check the first-run, replace and failure behaviour shared by
//! every adapter.

use std::fs;

use table_rotation::core::{Person, PersonId};
use table_rotation::rotation::{RotationEngine, Slot};
use table_rotation::storage::{Codec, FileStorage, InMemoryStorage, StorageAdapter, StorageError};
use table_rotation::Snapshot;

fn busy_snapshot() -> Snapshot {
    let mut engine = RotationEngine::new();
    for (id, name) in [("a", "Ana"), ("b", "Bia"), ("c", "Caio"), ("d", "Duda")] {
        engine.join(Person::new(id, name));
    }
    engine.start_match().unwrap();
    engine.record_result(Slot::Two).unwrap();
    engine.export_snapshot()
}

// =============================================================================
// File Storage
// =============================================================================

/// A missing file loads as the empty default snapshot.
#[test]
fn test_file_first_run_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("state.json"));

    let snapshot = storage.load().unwrap();
    assert_eq!(snapshot, Snapshot::default());
    assert_eq!(snapshot.cap, 3);
}

/// JSON save then load returns the same snapshot.
#[test]
fn test_file_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("state.json"));
    let snapshot = busy_snapshot();

    storage.save(&snapshot).unwrap();
    assert_eq!(storage.load().unwrap(), snapshot);

    let text = fs::read_to_string(storage.path()).unwrap();
    assert!(text.contains("\"streaks\""));
}

/// Bincode save then load returns the same snapshot.
#[test]
fn test_file_bincode_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("state.bin"));
    assert_eq!(storage.codec(), Codec::Bincode);

    let snapshot = busy_snapshot();
    storage.save(&snapshot).unwrap();
    assert_eq!(storage.load().unwrap(), snapshot);
}

/// Saving replaces the previous snapshot entirely and leaves no temp file.
#[test]
fn test_file_save_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let storage = FileStorage::new(&path);

    storage.save(&busy_snapshot()).unwrap();
    storage.save(&Snapshot::default()).unwrap();

    assert_eq!(storage.load().unwrap(), Snapshot::default());
    assert!(!dir.path().join("state.json.tmp").exists());
}

/// Missing parent directories are created on save.
#[test]
fn test_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("nested/deeper/state.json"));

    storage.save(&busy_snapshot()).unwrap();
    assert!(storage.path().exists());
}

/// A path that cannot be read as a file is reported as unavailable.
#[test]
fn test_file_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // The directory itself is not a readable snapshot file.
    let storage = FileStorage::new(dir.path());

    let err = storage.load().unwrap_err();
    assert!(matches!(err, StorageError::Unavailable { .. }), "got {:?}", err);
}

/// A parent path blocked by a regular file cannot be saved to.
#[test]
fn test_file_save_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let storage = FileStorage::new(blocker.join("state.json"));
    let err = storage.save(&Snapshot::default()).unwrap_err();
    assert!(matches!(err, StorageError::Unavailable { .. }), "got {:?}", err);
}

/// Garbage on disk is a serialization error, not a silent reset.
#[test]
fn test_file_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, b"{ not json").unwrap();

    let err = FileStorage::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

/// Snapshots from another format version are refused.
#[test]
fn test_file_version_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, br#"{"version": 99}"#).unwrap();

    let err = FileStorage::new(&path).load().unwrap_err();
    assert!(matches!(
        err,
        StorageError::UnsupportedVersion {
            found: 99,
            expected: 1
        }
    ));
}

/// Hand-written JSON with only the essentials loads with defaults.
#[test]
fn test_file_minimal_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(
        &path,
        br#"{"version": 1, "queue": [{"id": "x", "name": "Ana"}], "slot1": {"id": "y", "name": null}}"#,
    )
    .unwrap();

    let snapshot = FileStorage::new(&path).load().unwrap();
    assert_eq!(snapshot.queue.len(), 1);
    assert_eq!(snapshot.slot1.as_ref().map(|s| s.id.clone()), Some(PersonId::new("y")));
    assert!(snapshot.slot2.is_none());
    assert_eq!(snapshot.cap, 3);

    let mut engine = RotationEngine::new();
    engine.import_snapshot(snapshot);
    assert_eq!(engine.seat(Slot::One).map(|p| p.name.as_str()), Some("-"));
}

// =============================================================================
// Shared Contract
// =============================================================================

fn check_clear_helpers(storage: &dyn StorageAdapter) {
    storage.save(&busy_snapshot()).unwrap();

    storage.clear_table().unwrap();
    let snapshot = storage.load().unwrap();
    assert!(snapshot.slot1.is_none());
    assert!(snapshot.slot2.is_none());
    assert!(!snapshot.queue.is_empty());
    assert!(!snapshot.streaks.is_empty());

    storage.clear_queue().unwrap();
    let snapshot = storage.load().unwrap();
    assert!(snapshot.queue.is_empty());
    assert!(!snapshot.streaks.is_empty());
}

#[test]
fn test_clear_helpers_memory() {
    check_clear_helpers(&InMemoryStorage::new());
}

#[test]
fn test_clear_helpers_file() {
    let dir = tempfile::tempdir().unwrap();
    check_clear_helpers(&FileStorage::new(dir.path().join("state.json")));
}

/// Boxed adapters forward to the inner implementation.
#[test]
fn test_boxed_adapter() {
    let storage: Box<dyn StorageAdapter> = Box::new(InMemoryStorage::new());
    storage.save(&busy_snapshot()).unwrap();
    assert_eq!(storage.load().unwrap(), busy_snapshot());
}
