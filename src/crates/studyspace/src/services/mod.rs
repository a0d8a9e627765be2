//! Service layer
//!
//! Auth (password hashing and JWT issue/validation), PDF text
//! extraction, and the AI generation pipeline that ties sources, prompts,
//! the OpenRouter client, and note persistence together.

pub mod auth;
pub mod extract;
pub mod generation;

pub use auth::{ensure_admin_user, hash_password, verify_password, AuthError, JwtManager};
pub use extract::{enrich_pdf_metadata, extract_pdf_text, looks_like_pdf, ExtractError};
pub use generation::{ChatReply, GeneratedMaterial, GenerationError, MaterialRequest};
