//! Chat API models and DTOs

use serde::{Deserialize, Serialize};

use llm::ChatMessage;

use crate::api::error::ApiResult;
use crate::api::middleware::validation::validate_not_empty;
use crate::db::models::ChatSession;

/// Speaker of a chat turn as clients see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTurnRole {
    User,
    Assistant,
}

/// One turn of conversation sent to the chat generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatTurnRole,
    pub text: String,
}

impl ChatTurn {
    /// Convert into a provider chat message.
    pub fn to_message(&self) -> ChatMessage {
        match self.role {
            ChatTurnRole::User => ChatMessage::user(self.text.as_str()),
            ChatTurnRole::Assistant => ChatMessage::assistant(self.text.as_str()),
        }
    }
}

/// Request to save (upsert) a chat session's history.
///
/// Messages, sources, and settings are stored as the client sent them;
/// the shapes are client-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveChatRequest {
    pub session_id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub messages: Option<serde_json::Value>,

    #[serde(default)]
    pub sources: Option<serde_json::Value>,

    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

impl SaveChatRequest {
    /// Validate the save request
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.session_id, "sessionId")?;
        Ok(())
    }
}

/// Chat session for API responses; JSON columns are parsed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionResponse {
    pub session_id: String,
    pub title: String,
    pub messages: serde_json::Value,
    pub sources: serde_json::Value,
    pub settings: serde_json::Value,
    pub last_message_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ChatSessionResponse {
    /// Create a ChatSessionResponse from the database ChatSession model
    pub fn from_db_session(session: ChatSession) -> Self {
        Self {
            session_id: session.session_id,
            title: session.title,
            messages: parse_json_column(&session.messages, serde_json::json!([])),
            sources: parse_json_column(&session.sources, serde_json::json!([])),
            settings: parse_json_column(&session.settings, serde_json::json!({})),
            last_message_at: session.last_message_at,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

fn parse_json_column(raw: &str, fallback: serde_json::Value) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or(fallback)
}
