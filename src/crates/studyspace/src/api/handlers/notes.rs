//! Note endpoint handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::AuthUser;
use crate::api::models::{CreateNoteRequest, NoteResponse};
use crate::api::response;
use crate::api::routes::AppState;
use crate::db::repositories::NoteRepository;

/// List the authenticated user's notes, pinned first
///
/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let notes = NoteRepository::list_for_user(state.db.pool(), user.id).await?;
    let responses: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from_db_note).collect();
    Ok(response::ok(responses))
}

/// Create a note directly (e.g. saved from chat)
///
/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;
    let new_note = req.into_new_note()?;

    let note = NoteRepository::create(state.db.pool(), user.id, &new_note).await?;
    tracing::info!("Created note {} for user {}", note.id, user.id);
    Ok(response::created(NoteResponse::from_db_note(note)))
}

/// Delete a note
///
/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let deleted = NoteRepository::delete_for_user(state.db.pool(), user.id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    tracing::info!("Deleted note {} for user {}", id, user.id);
    Ok(response::ok(json!({ "message": "Note deleted" })))
}
