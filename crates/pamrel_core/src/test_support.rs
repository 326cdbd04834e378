//! Shared test-only helpers for pamrel_core.

use crate::clock::Clock;
use crate::models::paste::{Paste, PasteId};
use crate::Database;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Clock that only moves when a test advances it.
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 3, 1, 12, 0, 0).unwrap()
}

/// Minimal stored row for storage-level tests.
pub(crate) fn sample_paste(id: u128, content: &str) -> Paste {
    let now = fixed_time();
    Paste {
        id: PasteId::new(id),
        content: content.to_string(),
        language: "PlainText".to_string(),
        theme: "default".to_string(),
        numbers: true,
        created_at: now,
        modified_at: now,
        delete_at: None,
        delete_on_views: None,
        viewed: 0,
    }
}
