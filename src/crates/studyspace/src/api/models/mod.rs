//! API models and DTOs
//!
//! Request/response shapes for the REST surface. Wire names are
//! camelCase; JSON text columns from the database are parsed into real
//! JSON here before they reach a client.

pub mod auth;
pub mod chat;
pub mod generate;
pub mod note;
pub mod source;

pub use auth::{AuthData, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse};
pub use chat::{ChatSessionResponse, ChatTurn, ChatTurnRole, SaveChatRequest};
pub use generate::{
    GenerateChatRequest, GenerateChatResponse, GenerateMaterialRequest, GenerateMaterialResponse,
};
pub use note::{CreateNoteRequest, NoteResponse};
pub use source::{BulkActiveRequest, CreateSourceRequest, SourceResponse, UpdateSourceRequest};
