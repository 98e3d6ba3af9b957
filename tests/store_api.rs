//! Store API integration suite.
//!
//! Exercises the public store surface against a real database file in a
//! temp directory: identifier allocation, save/get consistency, ordered
//! retrieval, the error taxonomy, and behavior across reopen.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{Duration, Utc};
use snipdb::{Error, SnipDb, Snippet};
use tempfile::TempDir;

/// Open a store on a fresh temp directory, skipping fsync for speed.
///
/// The `TempDir` must be kept alive for as long as the database is used.
fn open_temp() -> (SnipDb, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let db = SnipDb::builder()
        .path(dir.path().join("snippets.redb"))
        .no_durability()
        .open()
        .expect("open snippet store");
    (db, dir)
}

fn week_from_now() -> chrono::DateTime<Utc> {
    Utc::now() + Duration::days(7)
}

// ============================================================================
// Identifier allocation
// ============================================================================

#[test]
fn test_save_assigns_increasing_ids_from_one() {
    let (db, _dir) = open_temp();

    for expected in 1..=5u64 {
        let saved = db.snippets.create("t", "c", week_from_now()).unwrap();
        assert_eq!(saved.id, expected);
        assert!(saved.is_persisted());
    }
}

#[test]
fn test_concurrent_saves_never_duplicate_ids() {
    const THREADS: usize = 8;
    const SAVES_PER_THREAD: usize = 25;

    let (db, _dir) = open_temp();
    let db = Arc::new(db);

    let mut ids = Vec::new();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let db = db.clone();
                scope.spawn(move || {
                    (0..SAVES_PER_THREAD)
                        .map(|i| {
                            db.snippets
                                .create(format!("t{}-{}", t, i), "c", week_from_now())
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        for handle in handles {
            ids.extend(handle.join().unwrap());
        }
    });

    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * SAVES_PER_THREAD);
    assert_eq!(
        unique,
        (1..=(THREADS * SAVES_PER_THREAD) as u64).collect::<HashSet<u64>>()
    );
}

#[test]
fn test_allocation_continues_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.redb");

    let db = SnipDb::open(&path).unwrap();
    for _ in 0..3 {
        db.snippets.create("t", "c", week_from_now()).unwrap();
    }
    db.close().unwrap();

    // Allocator state is persisted with the records: no reuse after restart.
    let db = SnipDb::open(&path).unwrap();
    let next = db.snippets.create("t", "c", week_from_now()).unwrap();
    assert_eq!(next.id, 4);
}

#[test]
fn test_upsert_with_existing_id_consumes_no_identifier() {
    let (db, _dir) = open_temp();

    let first = db.snippets.create("original", "c", week_from_now()).unwrap();

    let mut replacement = first.clone();
    replacement.title = "replaced".to_string();
    let stored = db.snippets.save(replacement).unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(db.snippets.get(first.id).unwrap().title, "replaced");

    // The upsert path must not have advanced the allocator.
    let next = db.snippets.create("t", "c", week_from_now()).unwrap();
    assert_eq!(next.id, first.id + 1);
}

// ============================================================================
// Save/Get consistency
// ============================================================================

#[test]
fn test_save_then_get_returns_equal_record() {
    let (db, _dir) = open_temp();

    let expires = week_from_now();
    let saved = db
        .snippets
        .create("An old silent pond", "A frog jumps in", expires)
        .unwrap();

    let loaded = db.snippets.get(saved.id).unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.expires, expires);
}

#[test]
fn test_save_stamps_created_on_first_save() {
    let (db, _dir) = open_temp();

    let before = Utc::now();
    let saved = db.snippets.create("t", "c", week_from_now()).unwrap();
    let after = Utc::now();

    assert!(saved.created >= before && saved.created <= after);
    assert_eq!(db.snippets.get(saved.id).unwrap().created, saved.created);
}

#[test]
fn test_upsert_preserves_caller_supplied_created() {
    let (db, _dir) = open_temp();

    let saved = db.snippets.create("t", "c", week_from_now()).unwrap();
    let replacement = Snippet {
        content: "new body".to_string(),
        ..saved.clone()
    };

    let stored = db.snippets.save(replacement).unwrap();
    assert_eq!(stored.created, saved.created);
}

#[test]
fn test_get_missing_id_is_not_found() {
    let (db, _dir) = open_temp();

    // Fresh store: the table does not exist yet.
    let err = db.snippets.get(1).unwrap_err();
    assert!(err.is_not_found());

    // Populated store: the key is simply absent.
    db.snippets.create("t", "c", week_from_now()).unwrap();
    let err = db.snippets.get(999).unwrap_err();
    assert!(matches!(err, Error::NotFound { id: 999 }));
}

// ============================================================================
// Ordered retrieval
// ============================================================================

#[test]
fn test_latest_on_empty_store_is_empty_not_error() {
    let (db, _dir) = open_temp();
    assert_eq!(db.snippets.latest(10).unwrap(), Vec::new());
    assert_eq!(db.snippets.latest(0).unwrap(), Vec::new());
}

#[test]
fn test_latest_returns_newest_first_with_bound() {
    let (db, _dir) = open_temp();

    let id_of_a = db.snippets.create("a", "c", week_from_now()).unwrap().id;
    db.snippets.create("b", "c", week_from_now()).unwrap();
    db.snippets.create("c", "c", week_from_now()).unwrap();

    let titles = |n: usize| -> Vec<String> {
        db.snippets
            .latest(n)
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect()
    };

    assert_eq!(titles(2), vec!["c", "b"]);
    assert_eq!(titles(10), vec!["c", "b", "a"]);
    assert_eq!(titles(3), vec!["c", "b", "a"]);
    assert_eq!(db.snippets.get(id_of_a).unwrap().title, "a");
}

#[test]
fn test_latest_exact_count() {
    let (db, _dir) = open_temp();

    for i in 0..20 {
        db.snippets
            .create(format!("snippet {}", i), "c", week_from_now())
            .unwrap();
    }

    let five = db.snippets.latest(5).unwrap();
    assert_eq!(five.len(), 5);
    let ids: Vec<u64> = five.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![20, 19, 18, 17, 16]);

    assert_eq!(db.snippets.latest(20).unwrap().len(), 20);
    assert_eq!(db.snippets.latest(100).unwrap().len(), 20);
}

// ============================================================================
// Corruption detection
// ============================================================================

#[test]
fn test_undecodable_value_is_corrupted_not_not_found() {
    use redb::TableDefinition;
    const RAW: TableDefinition<&[u8], &[u8]> = TableDefinition::new("Snippets");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.redb");

    // Plant a value that is not a well-formed record, via the raw engine.
    {
        let raw = redb::Database::create(&path).unwrap();
        let txn = raw.begin_write().unwrap();
        {
            let mut table = txn.open_table(RAW).unwrap();
            table
                .insert(7u64.to_be_bytes().as_slice(), b"not a record".as_slice())
                .unwrap();
        }
        txn.commit().unwrap();
    }

    let db = SnipDb::open(&path).unwrap();
    let err = db.snippets.get(7).unwrap_err();
    assert!(err.is_corrupted(), "got {:?}", err);

    let err = db.snippets.latest(10).unwrap_err();
    assert!(err.is_corrupted(), "got {:?}", err);
}

// ============================================================================
// Handle lifecycle
// ============================================================================

#[test]
fn test_ephemeral_store_round_trip() {
    let db = SnipDb::ephemeral().unwrap();
    assert!(db.path().is_none());

    let saved = db.snippets.create("t", "c", week_from_now()).unwrap();
    assert_eq!(db.snippets.get(saved.id).unwrap(), saved);
    db.close().unwrap();
}

#[test]
fn test_data_survives_close_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.redb");

    let saved = {
        let db = SnipDb::open(&path).unwrap();
        db.snippets.create("persistent", "c", week_from_now()).unwrap()
    };

    let db = SnipDb::open(&path).unwrap();
    assert_eq!(db.snippets.get(saved.id).unwrap(), saved);
    assert_eq!(db.path(), Some(path.as_path()));
}
