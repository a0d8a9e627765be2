//! Chat history endpoint handlers
//!
//! History persistence is client-driven: the client saves the whole
//! session after each turn and the server upserts by session id.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::AuthUser;
use crate::api::models::{ChatSessionResponse, SaveChatRequest};
use crate::api::response;
use crate::api::routes::AppState;
use crate::db::repositories::{ChatRepository, ChatSessionUpsert};

/// List the authenticated user's chat sessions, most recent first
///
/// GET /api/chat/history
pub async fn list_chat_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let sessions = ChatRepository::list_for_user(state.db.pool(), user.id).await?;
    let responses: Vec<ChatSessionResponse> = sessions
        .into_iter()
        .map(ChatSessionResponse::from_db_session)
        .collect();
    Ok(response::ok(responses))
}

/// Save (upsert) a chat session
///
/// POST /api/chat/history
pub async fn save_chat_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<SaveChatRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let save = ChatSessionUpsert {
        session_id: req.session_id,
        title: req.title.unwrap_or_else(|| "New Chat".to_string()),
        messages: req.messages.unwrap_or_else(|| json!([])).to_string(),
        sources: req.sources.unwrap_or_else(|| json!([])).to_string(),
        settings: req.settings.unwrap_or_else(|| json!({})).to_string(),
    };

    let session = ChatRepository::upsert(state.db.pool(), user.id, &save).await?;
    Ok(response::ok(ChatSessionResponse::from_db_session(session)))
}

/// Delete a chat session
///
/// DELETE /api/chat/history/:session_id
pub async fn delete_chat_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let deleted = ChatRepository::delete(state.db.pool(), user.id, &session_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Chat history not found".to_string()));
    }

    Ok(response::ok(json!({ "message": "Chat history deleted" })))
}
