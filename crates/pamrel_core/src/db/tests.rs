//! Database integration tests.

use super::*;
use crate::test_support::{fixed_time, sample_paste, setup_temp_db};
use chrono::Duration;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_insert_get_and_exists() {
    let (db, _temp) = setup_temp_db();
    let paste = sample_paste(0xabcde, "hello");

    assert!(!db.exists(paste.id).unwrap());
    db.insert(&paste).unwrap();
    assert!(db.exists(paste.id).unwrap());

    let stored = db.get(paste.id).unwrap().expect("stored paste");
    assert_eq!(stored, paste);
    assert!(db.get(PasteId::new(1)).unwrap().is_none());
}

#[test]
fn test_insert_duplicate_id_conflicts_without_overwriting() {
    let (db, _temp) = setup_temp_db();
    let original = sample_paste(42, "first");
    db.insert(&original).unwrap();

    let duplicate = sample_paste(42, "second");
    let err = db.insert(&duplicate).expect_err("duplicate insert must fail");
    assert!(matches!(err, AppError::Conflict(id) if id == original.id));
    assert_eq!(db.get(original.id).unwrap().unwrap().content, "first");
}

#[test]
fn test_increment_view_keeps_modified_at() {
    let (db, _temp) = setup_temp_db();
    let paste = sample_paste(7, "count me");
    db.insert(&paste).unwrap();

    let first = db.increment_view_and_fetch(paste.id).unwrap().unwrap();
    let second = db.increment_view_and_fetch(paste.id).unwrap().unwrap();
    assert_eq!(first.viewed, 1);
    assert_eq!(second.viewed, 2);
    assert_eq!(second.modified_at, paste.modified_at);
    assert_eq!(db.get(paste.id).unwrap().unwrap().viewed, 2);

    assert!(db
        .increment_view_and_fetch(PasteId::new(8))
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_reports_whether_row_existed() {
    let (db, _temp) = setup_temp_db();
    let mut paste = sample_paste(9, "bye");
    paste.delete_at = Some(fixed_time());
    db.insert(&paste).unwrap();

    assert!(db.delete(paste.id).unwrap());
    assert!(!db.delete(paste.id).unwrap());
    assert!(db.get(paste.id).unwrap().is_none());
    assert!(db
        .list_ids_expiring_before(fixed_time() + Duration::days(1))
        .unwrap()
        .is_empty());
}

#[test]
fn test_expiring_ids_are_inclusive_and_ordered_by_deadline() {
    let (db, _temp) = setup_temp_db();
    let now = fixed_time();
    let deadlines = [
        (1, Some(now + Duration::hours(1))),
        (2, Some(now - Duration::hours(2))),
        (3, Some(now)),
        (4, None),
        (5, Some(now - Duration::minutes(1))),
    ];
    for (id, delete_at) in deadlines {
        let mut paste = sample_paste(id, "x");
        paste.delete_at = delete_at;
        db.insert(&paste).unwrap();
    }

    let expiring = db.list_ids_expiring_before(now).unwrap();
    assert_eq!(
        expiring,
        vec![PasteId::new(2), PasteId::new(5), PasteId::new(3)]
    );
}

#[test]
fn test_data_survives_reopen() {
    let (db, temp) = setup_temp_db();
    let paste = sample_paste(0xfeed, "durable");
    db.insert(&paste).unwrap();
    drop(db);

    let path = temp.path().join("test.db");
    let reopened = Database::new(path.to_str().unwrap()).unwrap();
    assert_eq!(reopened.get(paste.id).unwrap().unwrap(), paste);
}

#[test]
fn test_concurrent_increments_are_not_lost() {
    let (db, _temp) = setup_temp_db();
    let paste = sample_paste(0xc0ffee, "hot paste");
    db.insert(&paste).unwrap();

    let workers = 8;
    let per_worker = 5;
    let barrier = Arc::new(Barrier::new(workers));
    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let worker = db.share().unwrap();
            let barrier = barrier.clone();
            let id = paste.id;
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..per_worker {
                    worker
                        .increment_view_and_fetch(id)
                        .expect("increment should not fail")
                        .expect("paste exists");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker join");
    }

    let stored = db.get(paste.id).unwrap().unwrap();
    assert_eq!(stored.viewed, (workers * per_worker) as u64);
}

#[test]
fn test_concurrent_inserts_of_same_id_admit_one_writer() {
    let (db, _temp) = setup_temp_db();
    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|content| {
            let worker = db.share().unwrap();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                worker.insert(&sample_paste(77, content))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker join"))
        .collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::Conflict(id)) if *id == PasteId::new(77))));
}
