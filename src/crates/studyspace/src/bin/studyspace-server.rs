//! Studyspace server binary
//!
//! Standalone REST server for the study workspace: auth, sources, notes,
//! chat history, and AI generation endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use studyspace::api::routes::create_router;
use studyspace::config::ServerConfig;
use studyspace::db::DatabaseConnection;
use studyspace::services::auth::{ensure_admin_user, JwtManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(rust_log)
        .init();

    // Load configuration, falling back to defaults plus environment
    tracing::info!("Loading server configuration...");
    let config = match ServerConfig::load() {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load configuration file: {}. Using defaults with environment overrides.",
                e
            );
            ServerConfig::from_env()
        }
    };

    tracing::info!("Server name: {}", config.server.name);
    tracing::info!("Database path: {}", config.database.path);
    tracing::info!("Chat model: {}", config.llm.chat_model);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Initialize database connection
    let database_url = config.database_url();
    tracing::info!("Connecting to database: {}", database_url);
    let db = DatabaseConnection::new(&database_url).await?;

    // Run migrations
    tracing::info!("Running database migrations");
    db.run_migrations().await?;

    // Health check the database
    tracing::info!("Performing database health check");
    db.health_check().await?;

    // Seed the demo admin account
    ensure_admin_user(db.pool()).await?;

    // JWT manager from config or environment
    let jwt = match &config.auth.jwt_secret {
        Some(secret) => JwtManager::new(secret.clone(), config.auth.token_ttl_days)?,
        None => JwtManager::from_env()?,
    };

    // Build the router
    tracing::info!("Building API router");
    let app = create_router(db, Arc::new(config), Arc::new(jwt));

    // Create server
    tracing::info!("Starting studyspace server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Run server with graceful shutdown
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Studyspace server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL-C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
