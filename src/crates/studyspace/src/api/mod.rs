//! REST API layer
//!
//! Routes, handlers, request/response models, middleware, and error
//! conversion for the `/api` surface.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::{create_router, AppState};
