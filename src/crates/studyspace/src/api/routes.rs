//! API route definitions
//!
//! Defines all API routes and their associated handler functions.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{handlers, middleware};
use crate::config::ServerConfig;
use crate::db::DatabaseConnection;
use crate::services::JwtManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<ServerConfig>,
    pub jwt: Arc<JwtManager>,
}

/// Build the complete API router
pub fn create_router(db: DatabaseConnection, config: Arc<ServerConfig>, jwt: Arc<JwtManager>) -> Router {
    let app_state = AppState { db, config, jwt };

    Router::new()
        // Health check (public)
        .route("/api/health", get(handlers::health))
        // Public read-only sources
        .route("/api/public/sources", get(handlers::public_sources))
        // Auth endpoints
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/auth/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/auth/logout", post(handlers::logout))
        // Source endpoints
        .route(
            "/api/sources",
            get(handlers::list_sources).post(handlers::create_source),
        )
        .route("/api/sources/bulk/active", put(handlers::bulk_set_active))
        .route(
            "/api/sources/:id",
            put(handlers::update_source).delete(handlers::delete_source),
        )
        // Note endpoints
        .route(
            "/api/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/api/notes/:id", delete(handlers::delete_note))
        // Chat history endpoints
        .route(
            "/api/chat/history",
            get(handlers::list_chat_history).post(handlers::save_chat_history),
        )
        .route(
            "/api/chat/history/:session_id",
            delete(handlers::delete_chat_history),
        )
        // Generation endpoints
        .route("/api/generate/material", post(handlers::generate_material))
        .route("/api/generate/chat", post(handlers::generate_chat))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
