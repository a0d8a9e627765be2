//! API middleware layer
//!
//! CORS, request validation helpers, and the Bearer-token auth extractor.

pub mod auth;
pub mod cors;
pub mod validation;

pub use auth::AuthUser;
pub use cors::cors_layer;
pub use validation::{validate_min_length, validate_not_empty, validate_string_length};
