//! Data models for persistence and API payloads.

/// Paste records, identifiers and request/response projections.
pub mod paste;

#[cfg(test)]
mod tests;
