//! Shared constants used across Pamrel crates.

/// Default API port for Pamrel.
pub const DEFAULT_PORT: u16 = 38412;

/// Default maximum paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Theme assigned to pastes that do not request one.
pub const DEFAULT_THEME: &str = "default";

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";
