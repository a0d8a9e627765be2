//! Database repositories
//!
//! One repository per table, in the associated-function style: each takes
//! the pool explicitly so callers control transactions and lifetimes.

pub mod chat_repo;
pub mod note_repo;
pub mod source_repo;
pub mod user_repo;

pub use chat_repo::{ChatRepository, ChatSessionUpsert};
pub use note_repo::NoteRepository;
pub use source_repo::{NewSource, SourceRepository, SourceUpdate};
pub use user_repo::{ProfileUpdate, UserRepository};
