//! Core domain library for Pamrel (ids, content processing, paste lifecycle, storage).

/// Time sources used for expiry evaluation and id derivation.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Save-time content transforms and language resolution.
pub mod content;
/// Storage trait and the redb-backed implementation.
pub mod db;
/// Language catalog and detection.
pub mod detection;
/// Process-global environment helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Digest-derived paste identifiers.
pub mod ident;
/// Paste creation, view counting and expiry.
pub mod lifecycle;
/// Data models for requests and persistence.
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, DEFAULT_THEME};
pub use content::{ContentProcessor, ProcessedContent};
pub use db::{Database, PasteStore};
pub use detection::{HeuristicDetector, LanguageDetector};
pub use error::AppError;
pub use ident::IdGenerator;
pub use lifecycle::{PasteService, PasteState};
pub use models::paste::{CreatePasteRequest, HighlightHint, Paste, PasteId, PasteMeta};
