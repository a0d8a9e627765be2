//! Chat session model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted chat session: the ordered message history plus the source
/// selection and model settings the client used, keyed by
/// (user, session id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatSession {
    /// Row id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Client-generated session identifier
    pub session_id: String,

    /// Session title shown in the sidebar
    pub title: String,

    /// Role-tagged messages as a JSON array
    pub messages: String,

    /// Source ids the session was grounded on, as a JSON array
    pub sources: String,

    /// Client model settings as a JSON blob
    pub settings: String,

    /// Soft-delete flag
    pub is_active: bool,

    /// Timestamp of the latest message (RFC3339 string)
    pub last_message_at: String,

    /// Creation timestamp (RFC3339 string)
    pub created_at: String,

    /// Last update timestamp (RFC3339 string)
    pub updated_at: String,
}
