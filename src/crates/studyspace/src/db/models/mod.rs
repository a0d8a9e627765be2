//! Database models
//!
//! Typed rows for the workspace tables. All timestamp fields are RFC3339
//! strings due to SQLite type limitations; JSON blobs stay TEXT here and
//! are parsed at the API boundary.

pub mod chat_session;
pub mod note;
pub mod source;
pub mod user;

pub use chat_session::ChatSession;
pub use note::{NewNote, Note};
pub use source::Source;
pub use user::User;
