//! Application error types for core storage and domain logic.
use crate::models::paste::PasteId;
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Not found")]
    NotFound,

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No free identifier could be derived within the retry bound.
    #[error("Unable to allocate a paste id: id space is exhausted")]
    CapacityExhausted,

    /// An insert raced with another writer for the same primary key.
    #[error("Paste id '{0}' already exists")]
    Conflict(PasteId),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::StorageMessage(format!("JSON encoding failed: {value}"))
    }
}
