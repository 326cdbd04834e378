//! Paste HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use pamrel_core::{AppError, CreatePasteRequest, HighlightHint, Paste, PasteId, PasteMeta};
use serde::Serialize;

/// Response body for a created paste.
#[derive(Debug, Serialize)]
pub struct CreatedPaste {
    pub id: PasteId,
    pub url: String,
    pub paste: Paste,
}

/// A served paste together with its rendering hint.
#[derive(Debug, Serialize)]
pub struct PasteView {
    #[serde(flatten)]
    pub paste: Paste,
    pub highlight: HighlightHint,
}

/// Malformed ids are indistinguishable from missing ones.
fn parse_id(raw: &str) -> Result<PasteId, HttpError> {
    raw.parse().map_err(|_| AppError::NotFound.into())
}

fn paste_url(state: &AppState, id: PasteId) -> String {
    match state.config.base_url.as_deref() {
        Some(base) => format!("{}/{}", base, id),
        None => format!("/{}", id),
    }
}

/// Create a new paste.
///
/// # Errors
/// Returns an error if validation, content processing or persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    Json(req): Json<CreatePasteRequest>,
) -> Result<Json<CreatedPaste>, HttpError> {
    if req.content.len() > state.config.max_paste_size {
        return Err(AppError::BadRequest(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        ))
        .into());
    }

    let paste = state.service.create_paste(req)?;
    Ok(Json(CreatedPaste {
        id: paste.id,
        url: paste_url(&state, paste.id),
        paste,
    }))
}

/// Fetch a paste and count the view.
///
/// # Errors
/// Returns `404` for unknown, malformed or expired ids.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PasteView>, HttpError> {
    let (paste, highlight) = state.service.read_paste(parse_id(&id)?)?;
    Ok(Json(PasteView { paste, highlight }))
}

/// Fetch raw paste content as plain text and count the view.
///
/// # Errors
/// Returns `404` for unknown, malformed or expired ids.
pub async fn get_raw(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let (paste, _) = state.service.read_paste(parse_id(&id)?)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        paste.content,
    ))
}

/// Fetch paste metadata without counting a view.
///
/// # Errors
/// Returns `404` for unknown, malformed or expired ids.
pub async fn get_meta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PasteMeta>, HttpError> {
    Ok(Json(state.service.read_meta(parse_id(&id)?)?))
}

/// Delete a paste.
///
/// # Errors
/// Returns `404` if the paste does not exist.
pub async fn delete_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.service.delete_paste(parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}
