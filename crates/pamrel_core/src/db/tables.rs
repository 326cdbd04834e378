//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Canonical paste rows keyed by numeric id (`Paste`, bincode-encoded).
pub const PASTES: TableDefinition<u128, &[u8]> = TableDefinition::new("pastes");

/// Deadline index ordered by `delete_at` micros then id.
pub const PASTES_BY_DELETE_AT: TableDefinition<(i64, u128), ()> =
    TableDefinition::new("pastes_by_delete_at");
