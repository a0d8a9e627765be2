//! CORS middleware configuration
//!
//! The original deployment accepted any origin (browser clients talk to
//! the API directly), so the layer stays permissive.

use tower_http::cors::CorsLayer;

/// Create CORS layer allowing any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
