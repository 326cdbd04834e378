//! Language catalog endpoint.

use axum::Json;
use pamrel_core::detection::catalog::{Language, CATALOG_VERSION, LANGUAGES};
use serde::Serialize;

/// Versioned list of selectable languages.
#[derive(Debug, Serialize)]
pub struct LanguageCatalog {
    pub version: u32,
    pub languages: &'static [Language],
}

/// List the embedded language catalog.
pub async fn list_languages() -> Json<LanguageCatalog> {
    Json(LanguageCatalog {
        version: CATALOG_VERSION,
        languages: LANGUAGES,
    })
}
