//! Generation API models and DTOs

use serde::{Deserialize, Serialize};

use studio::prompts::GenerationOptions;
use studio::StudyMaterialType;

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::chat::ChatTurn;
use crate::api::models::note::NoteResponse;
use crate::services::generation::MaterialRequest;

/// Request to generate a study material from selected sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMaterialRequest {
    /// Material kind to generate
    pub material_type: StudyMaterialType,

    /// Sources to ground the generation on
    #[serde(default)]
    pub source_ids: Vec<i64>,

    /// Generation knobs (counts, difficulty, style, topic)
    #[serde(default)]
    pub options: GenerationOptions,

    /// Per-request OpenRouter key, overriding the server's
    #[serde(default)]
    pub api_key: Option<String>,
}

impl GenerateMaterialRequest {
    /// Validate the generation request
    pub fn validate(&self) -> ApiResult<()> {
        if self.source_ids.is_empty() {
            return Err(ApiError::ValidationError(
                "Select at least one source first".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert into the service-layer request.
    pub fn into_material_request(self) -> MaterialRequest {
        MaterialRequest {
            material_type: self.material_type,
            source_ids: self.source_ids,
            options: self.options,
            api_key: self.api_key,
        }
    }
}

/// A generated material: the persisted note plus the truncation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMaterialResponse {
    pub note: NoteResponse,
    pub context_truncated: bool,
}

/// Request for a source-grounded chat reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateChatRequest {
    /// Conversation so far, oldest first
    #[serde(default)]
    pub messages: Vec<ChatTurn>,

    /// Sources to ground the answer on (may be empty)
    #[serde(default)]
    pub source_ids: Vec<i64>,

    /// Per-request OpenRouter key, overriding the server's
    #[serde(default)]
    pub api_key: Option<String>,
}

impl GenerateChatRequest {
    /// Validate the chat request
    pub fn validate(&self) -> ApiResult<()> {
        if self.messages.is_empty() {
            return Err(ApiError::ValidationError(
                "messages cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Assistant reply plus the truncation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateChatResponse {
    pub reply: String,
    pub context_truncated: bool,
}
