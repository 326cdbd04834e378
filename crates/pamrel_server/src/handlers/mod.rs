//! HTTP request handlers.

/// Language catalog endpoint.
pub mod languages;
/// Paste-related endpoints.
pub mod paste;
