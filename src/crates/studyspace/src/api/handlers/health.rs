//! Health check endpoint handler

use axum::{extract::State, Json};
use serde_json::json;

use crate::api::routes::AppState;

/// Health check
///
/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = if state.db.health_check().await.is_ok() {
        "ok"
    } else {
        "unavailable"
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
