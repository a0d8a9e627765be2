//! Generation endpoint handlers
//!
//! The server-side binding of the AI service layer: material generation
//! and source-grounded chat. Provider failures map to typed API errors;
//! there is no retry.

use axum::{extract::State, Json};

use llm::ChatMessage;

use crate::api::error::ApiResult;
use crate::api::middleware::AuthUser;
use crate::api::models::{
    GenerateChatRequest, GenerateChatResponse, GenerateMaterialRequest, GenerateMaterialResponse,
    NoteResponse,
};
use crate::api::response;
use crate::api::routes::AppState;
use crate::services::generation;

/// Generate a study material from selected sources and persist it
///
/// POST /api/generate/material
pub async fn generate_material(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<GenerateMaterialRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;
    let request = req.into_material_request();

    tracing::info!(
        "Generating {} for user {} from {} sources",
        request.material_type,
        user.id,
        request.source_ids.len()
    );

    let generated =
        generation::generate_material(state.db.pool(), &state.config.llm, user.id, &request)
            .await?;

    if generated.context_truncated {
        tracing::warn!("Context truncated for user {} generation", user.id);
    }

    Ok(response::created(GenerateMaterialResponse {
        note: NoteResponse::from_db_note(generated.note),
        context_truncated: generated.context_truncated,
    }))
}

/// Answer a chat turn grounded in the selected sources
///
/// POST /api/generate/chat
pub async fn generate_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<GenerateChatRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let messages: Vec<ChatMessage> = req.messages.iter().map(|turn| turn.to_message()).collect();

    let reply = generation::chat_reply(
        state.db.pool(),
        &state.config.llm,
        user.id,
        &messages,
        &req.source_ids,
        req.api_key.as_deref(),
    )
    .await?;

    Ok(response::ok(GenerateChatResponse {
        reply: reply.reply,
        context_truncated: reply.context_truncated,
    }))
}
