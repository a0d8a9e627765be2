//! API endpoint handlers

pub mod auth;
pub mod chat;
pub mod generate;
pub mod health;
pub mod notes;
pub mod sources;

pub use auth::{get_profile, login, logout, register, update_profile};
pub use chat::{delete_chat_history, list_chat_history, save_chat_history};
pub use generate::{generate_chat, generate_material};
pub use health::health;
pub use notes::{create_note, delete_note, list_notes};
pub use sources::{
    bulk_set_active, create_source, delete_source, list_sources, public_sources, update_source,
};
