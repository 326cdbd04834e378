//! Paste storage operations backed by redb.

use crate::{db::tables::*, error::AppError, models::paste::*};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for paste-related redb tables.
pub struct PasteDb {
    db: Arc<redb::Database>,
}

fn deserialize_paste(bytes: &[u8]) -> Result<Paste, bincode::Error> {
    bincode::deserialize(bytes)
}

fn deadline_key(paste: &Paste) -> Option<(i64, u128)> {
    paste
        .delete_at
        .map(|deadline| (deadline.timestamp_micros(), paste.id.get()))
}

impl PasteDb {
    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.open_table(PASTES_BY_DELETE_AT)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    pub fn exists(&self, id: PasteId) -> Result<bool, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.get(id.get())?.is_some())
    }

    /// Fetch a paste by id.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: PasteId) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id.get())? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    /// Insert a new paste row and its deadline index entry atomically.
    ///
    /// # Errors
    /// Returns [`AppError::Conflict`] when the id already exists, or an error
    /// when serialization or storage operations fail.
    pub fn create(&self, paste: &Paste) -> Result<(), AppError> {
        let encoded = bincode::serialize(paste)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut deadlines = write_txn.open_table(PASTES_BY_DELETE_AT)?;

            if pastes.get(paste.id.get())?.is_some() {
                return Err(AppError::Conflict(paste.id));
            }

            pastes.insert(paste.id.get(), encoded.as_slice())?;
            if let Some(key) = deadline_key(paste) {
                deadlines.insert(key, ())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Bump the view counter inside one write transaction and return the row.
    ///
    /// `modified_at` is left untouched.
    ///
    /// # Errors
    /// Returns an error when storage access or (de)serialization fails.
    pub fn increment_view_and_fetch(&self, id: PasteId) -> Result<Option<Paste>, AppError> {
        let write_txn = self.db.begin_write()?;
        let paste = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut paste = match pastes.get(id.get())? {
                Some(value) => deserialize_paste(value.value())?,
                None => return Ok(None),
            };
            paste.viewed = paste.viewed.saturating_add(1);
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id.get(), encoded.as_slice())?;
            paste
        };
        write_txn.commit()?;
        Ok(Some(paste))
    }

    /// Delete a paste row and its deadline index entry.
    ///
    /// # Returns
    /// `Ok(true)` if a paste was deleted, `Ok(false)` if not found.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn delete(&self, id: PasteId) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut deadlines = write_txn.open_table(PASTES_BY_DELETE_AT)?;

            let removed = match pastes.remove(id.get())? {
                Some(value) => Some(deserialize_paste(value.value())?),
                None => None,
            };
            match removed {
                Some(paste) => {
                    if let Some(key) = deadline_key(&paste) {
                        deadlines.remove(key)?;
                    }
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Scan the deadline index up to and including `now`.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn ids_expiring_before(&self, now: DateTime<Utc>) -> Result<Vec<PasteId>, AppError> {
        let cutoff = (now.timestamp_micros(), u128::MAX);
        let read_txn = self.db.begin_read()?;
        let deadlines = read_txn.open_table(PASTES_BY_DELETE_AT)?;
        let mut ids = Vec::new();
        for entry in deadlines.range(..=cutoff)? {
            let (key, _) = entry?;
            let (_, id) = key.value();
            ids.push(PasteId::new(id));
        }
        Ok(ids)
    }
}
