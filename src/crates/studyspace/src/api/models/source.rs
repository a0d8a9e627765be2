//! Source API models and DTOs

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validation::validate_not_empty;
use crate::db::models::Source;

/// Request to create a source. PDF uploads carry base64 in `content`
/// (optionally as a data URL) and get text-extracted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceRequest {
    /// Display name, usually the file name
    pub name: String,

    /// Raw content (base64 for PDFs, plain text otherwise)
    #[serde(default)]
    pub content: String,

    /// Source kind: file, link, text, youtube (default "file")
    #[serde(default)]
    pub source_type: Option<String>,

    /// File extension hint (default "unknown")
    #[serde(default)]
    pub file_type: Option<String>,

    /// Extra metadata to store alongside the source
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,

    /// Tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Whether the source starts enabled (default true)
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateSourceRequest {
    /// Validate the create request
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.name, "name")?;
        Ok(())
    }
}

/// Request to update a source; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub tags: Option<Vec<String>>,
    /// Merged into the stored metadata blob
    pub metadata: Option<serde_json::Value>,
}

impl UpdateSourceRequest {
    /// Check if any fields are being updated
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.content.is_some()
            || self.is_active.is_some()
            || self.tags.is_some()
            || self.metadata.is_some()
    }
}

/// Request to toggle the active flag on several sources at once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActiveRequest {
    pub source_ids: Vec<i64>,
    pub is_active: bool,
}

/// Source for API responses; metadata and tags are parsed JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponse {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub source_type: String,
    pub file_type: String,
    pub size: i64,
    pub is_active: bool,
    pub metadata: serde_json::Value,
    pub tags: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl SourceResponse {
    /// Create a SourceResponse from the database Source model
    pub fn from_db_source(source: Source) -> Self {
        let metadata = serde_json::from_str(&source.metadata)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        let tags = serde_json::from_str(&source.tags)
            .unwrap_or_else(|_| serde_json::Value::Array(Default::default()));
        Self {
            id: source.id,
            name: source.name,
            content: source.content,
            source_type: source.source_type,
            file_type: source.file_type,
            size: source.size,
            is_active: source.is_active,
            metadata,
            tags,
            created_at: source.created_at,
            updated_at: source.updated_at,
        }
    }
}
