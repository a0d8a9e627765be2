//! Study workspace REST server.
//!
//! A thin backend for the study workspace: JWT auth over bcrypt-hashed
//! credentials, CRUD for sources/notes/chat history in SQLite, PDF text
//! extraction at upload time, and the generation endpoints that bind the
//! `studio` domain core to the OpenRouter client in `llm`.

pub mod api;
pub mod config;
pub mod db;
pub mod services;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
