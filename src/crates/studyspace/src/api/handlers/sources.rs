//! Source endpoint handlers
//!
//! CRUD plus bulk activation for the user's uploaded documents. PDF
//! uploads go through text extraction at create time; the outcome lands
//! in the source metadata either way.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::AuthUser;
use crate::api::models::{
    BulkActiveRequest, CreateSourceRequest, SourceResponse, UpdateSourceRequest,
};
use crate::api::response;
use crate::api::routes::AppState;
use crate::db::repositories::{NewSource, SourceRepository, SourceUpdate, UserRepository};
use crate::services::extract;

/// List the authenticated user's sources
///
/// GET /api/sources
pub async fn list_sources(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<impl axum::response::IntoResponse> {
    let sources = SourceRepository::list_for_user(state.db.pool(), user.id).await?;
    let responses: Vec<SourceResponse> =
        sources.into_iter().map(SourceResponse::from_db_source).collect();
    Ok(response::ok(responses))
}

/// Create a source, extracting text from PDF uploads
///
/// POST /api/sources
pub async fn create_source(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateSourceRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let file_type = req.file_type.unwrap_or_else(|| "unknown".to_string());
    let source_type = req.source_type.unwrap_or_else(|| "file".to_string());
    let mut metadata = req.metadata.unwrap_or_else(|| json!({}));

    if extract::looks_like_pdf(&req.name, &file_type) && !req.content.is_empty() {
        metadata = extract::enrich_pdf_metadata(&req.name, &req.content, metadata);
    }

    let new_source = NewSource {
        name: req.name,
        content: req.content,
        source_type,
        file_type,
        metadata: metadata.to_string(),
        tags: serde_json::to_string(&req.tags.unwrap_or_default())?,
        is_active: req.is_active.unwrap_or(true),
    };

    let source = SourceRepository::create(state.db.pool(), user.id, &new_source).await?;
    tracing::info!("Created source {} for user {}", source.id, user.id);
    Ok(response::created(SourceResponse::from_db_source(source)))
}

/// Update a source
///
/// PUT /api/sources/:id
pub async fn update_source(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSourceRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let existing = SourceRepository::get_for_user(pool, user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Source not found".to_string()))?;

    // Metadata patches merge into the stored blob.
    let metadata = match req.metadata {
        Some(patch) => {
            let mut current: serde_json::Value =
                serde_json::from_str(&existing.metadata).unwrap_or_else(|_| json!({}));
            if let (Some(current), Some(patch)) = (current.as_object_mut(), patch.as_object()) {
                for (key, value) in patch {
                    current.insert(key.clone(), value.clone());
                }
            }
            Some(current.to_string())
        }
        None => None,
    };

    let update = SourceUpdate {
        name: req.name,
        content: req.content,
        is_active: req.is_active,
        metadata,
        tags: req.tags.map(|tags| serde_json::to_string(&tags)).transpose()?,
    };

    let updated = SourceRepository::update(pool, user.id, id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Source not found".to_string()))?;

    Ok(response::ok(SourceResponse::from_db_source(updated)))
}

/// Delete a source
///
/// DELETE /api/sources/:id
pub async fn delete_source(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let deleted = SourceRepository::delete_for_user(state.db.pool(), user.id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Source not found".to_string()));
    }

    tracing::info!("Deleted source {} for user {}", id, user.id);
    Ok(response::ok(json!({ "message": "Source deleted" })))
}

/// Toggle the active flag on several sources
///
/// PUT /api/sources/bulk/active
pub async fn bulk_set_active(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<BulkActiveRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    if req.source_ids.is_empty() {
        return Err(ApiError::ValidationError(
            "sourceIds cannot be empty".to_string(),
        ));
    }

    let updated =
        SourceRepository::set_active_bulk(state.db.pool(), user.id, &req.source_ids, req.is_active)
            .await?;

    Ok(response::ok(json!({ "updated": updated })))
}

/// Public read-only listing of the demo admin's sources
///
/// GET /api/public/sources
pub async fn public_sources(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let pool = state.db.pool();
    let admin = UserRepository::find_by_username(pool, "admin").await?;

    let sources = match admin {
        Some(admin) => SourceRepository::list_for_user(pool, admin.id).await?,
        None => Vec::new(),
    };

    let responses: Vec<SourceResponse> =
        sources.into_iter().map(SourceResponse::from_db_source).collect();
    Ok(response::ok(responses))
}
