//! Storage seam and the redb-backed paste store.

/// Paste storage helpers.
pub mod paste;
/// redb table definitions.
pub mod tables;

use crate::constants::REDB_FILE_NAME;
use crate::error::AppError;
use crate::models::paste::{Paste, PasteId};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// Persistence operations the paste lifecycle depends on.
///
/// Implementations must make [`PasteStore::insert`] and
/// [`PasteStore::increment_view_and_fetch`] atomic per id.
pub trait PasteStore: Send + Sync {
    /// Whether a paste with `id` is currently stored.
    fn exists(&self, id: PasteId) -> Result<bool, AppError>;

    /// Fetch a paste without side effects.
    fn get(&self, id: PasteId) -> Result<Option<Paste>, AppError>;

    /// Persist a new paste.
    ///
    /// # Errors
    /// Returns [`AppError::Conflict`] when the id is already taken.
    fn insert(&self, paste: &Paste) -> Result<(), AppError>;

    /// Add one to `viewed` and return the updated row in a single step.
    ///
    /// # Returns
    /// `Ok(None)` when the paste does not exist.
    fn increment_view_and_fetch(&self, id: PasteId) -> Result<Option<Paste>, AppError>;

    /// Remove a paste.
    ///
    /// # Returns
    /// `Ok(true)` when a row was removed, `Ok(false)` when it was already gone.
    fn delete(&self, id: PasteId) -> Result<bool, AppError>;

    /// Ids whose `delete_at` is at or before `now`.
    fn list_ids_expiring_before(&self, now: DateTime<Utc>) -> Result<Vec<PasteId>, AppError>;
}

/// Database handle with access to paste tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: paste::PasteDb,
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: paste::PasteDb::new(db.clone())?,
            db,
        })
    }

    /// Create another handle over the same redb instance.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the store inside directory `path`.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or redb fails to
    /// open the database file.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(REDB_FILE_NAME);
        let db = redb::Database::create(&file).map_err(|err| {
            if matches!(err, redb::DatabaseError::DatabaseAlreadyOpen) {
                AppError::StorageMessage(format!(
                    "Database '{}' is already open in another process",
                    file.display()
                ))
            } else {
                AppError::from(err)
            }
        })?;
        tracing::debug!("Opened paste store at {}", file.display());
        Self::from_shared(Arc::new(db))
    }
}

impl PasteStore for Database {
    fn exists(&self, id: PasteId) -> Result<bool, AppError> {
        self.pastes.exists(id)
    }

    fn get(&self, id: PasteId) -> Result<Option<Paste>, AppError> {
        self.pastes.get(id)
    }

    fn insert(&self, paste: &Paste) -> Result<(), AppError> {
        self.pastes.create(paste)
    }

    fn increment_view_and_fetch(&self, id: PasteId) -> Result<Option<Paste>, AppError> {
        self.pastes.increment_view_and_fetch(id)
    }

    fn delete(&self, id: PasteId) -> Result<bool, AppError> {
        self.pastes.delete(id)
    }

    fn list_ids_expiring_before(&self, now: DateTime<Utc>) -> Result<Vec<PasteId>, AppError> {
        self.pastes.ids_expiring_before(now)
    }
}
