//! Note API models and DTOs

use serde::{Deserialize, Serialize};
use tracing::warn;

use studio::{FlashcardData, MindMapData, PresentationData, QuizData};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::validation::validate_not_empty;
use crate::db::models::{NewNote, Note};

/// Request to create a note directly (generated notes come through the
/// generation endpoints instead). A typed payload is only accepted when
/// it matches `note_type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,

    #[serde(default)]
    pub content: String,

    /// Material kind label (default "summary")
    #[serde(default)]
    pub note_type: Option<String>,

    /// Source ids this note was derived from
    #[serde(default)]
    pub source_ids: Vec<i64>,

    #[serde(default)]
    pub quiz_data: Option<QuizData>,

    #[serde(default)]
    pub flashcard_data: Option<FlashcardData>,

    #[serde(default)]
    pub mind_map_data: Option<MindMapData>,

    #[serde(default)]
    pub presentation_data: Option<PresentationData>,

    #[serde(default)]
    pub infographic_image_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub is_pinned: bool,
}

impl CreateNoteRequest {
    /// Validate the create request
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.title, "title")?;
        Ok(())
    }

    /// Convert into an insertable note, enforcing the
    /// payload-matches-type invariant.
    pub fn into_new_note(self) -> ApiResult<NewNote> {
        let note_type = self.note_type.unwrap_or_else(|| "summary".to_string());

        let mut note = NewNote::new(self.title, self.content, note_type)
            .with_source_ids(self.source_ids);
        note.tags = self.tags;
        note.color = self.color;
        note.is_pinned = self.is_pinned;
        note.quiz_data = encode_payload(self.quiz_data)?;
        note.flashcard_data = encode_payload(self.flashcard_data)?;
        note.mind_map_data = encode_payload(self.mind_map_data)?;
        note.presentation_data = encode_payload(self.presentation_data)?;
        note.infographic_image_url = self.infographic_image_url;

        if !note.payload_matches_type() {
            return Err(ApiError::ValidationError(format!(
                "payload does not match note type '{}'",
                note.note_type
            )));
        }

        Ok(note)
    }
}

fn encode_payload<T: Serialize>(payload: Option<T>) -> ApiResult<Option<String>> {
    payload
        .map(|value| serde_json::to_string(&value).map_err(ApiError::from))
        .transpose()
}

/// Note for API responses; JSON columns are parsed into typed payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub note_type: String,
    pub source_count: i64,
    pub sources: Vec<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_data: Option<QuizData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flashcard_data: Option<FlashcardData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mind_map_data: Option<MindMapData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_data: Option<PresentationData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub infographic_image_url: Option<String>,

    pub tags: Vec<String>,
    pub is_pinned: bool,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteResponse {
    /// Create a NoteResponse from the database Note model.
    ///
    /// A stored payload that no longer parses is dropped with a warning
    /// rather than failing the whole listing.
    pub fn from_db_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            source_count: note.source_count,
            sources: parse_or_default(&note.sources, "sources", note.id),
            quiz_data: parse_payload(note.quiz_data.as_deref(), "quiz_data", note.id),
            flashcard_data: parse_payload(note.flashcard_data.as_deref(), "flashcard_data", note.id),
            mind_map_data: parse_payload(note.mind_map_data.as_deref(), "mind_map_data", note.id),
            presentation_data: parse_payload(
                note.presentation_data.as_deref(),
                "presentation_data",
                note.id,
            ),
            infographic_image_url: note.infographic_image_url,
            tags: parse_or_default(&note.tags, "tags", note.id),
            is_pinned: note.is_pinned,
            color: note.color,
            created_at: note.created_at,
            updated_at: note.updated_at,
            note_type: note.note_type,
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
    column: &str,
    note_id: i64,
) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Note {} has unparseable {}: {}", note_id, column, err);
            None
        }
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(
    raw: &str,
    column: &str,
    note_id: i64,
) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("Note {} has unparseable {}: {}", note_id, column, err);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_payload_accepted() {
        let req = CreateNoteRequest {
            title: "Quiz".to_string(),
            note_type: Some("quiz".to_string()),
            quiz_data: Some(QuizData {
                title: "Quiz".to_string(),
                questions: vec![],
            }),
            ..CreateNoteRequest::default()
        };
        let note = req.into_new_note().unwrap();
        assert!(note.quiz_data.is_some());
    }

    #[test]
    fn test_mismatched_payload_rejected() {
        let req = CreateNoteRequest {
            title: "Summary".to_string(),
            note_type: Some("summary".to_string()),
            quiz_data: Some(QuizData {
                title: "Quiz".to_string(),
                questions: vec![],
            }),
            ..CreateNoteRequest::default()
        };
        assert!(req.into_new_note().is_err());
    }

    #[test]
    fn test_response_drops_unparseable_payload() {
        let note = Note {
            id: 1,
            user_id: 1,
            title: "Quiz".to_string(),
            content: "{}".to_string(),
            note_type: "quiz".to_string(),
            source_count: 0,
            sources: "not json".to_string(),
            quiz_data: Some("also not json".to_string()),
            flashcard_data: None,
            mind_map_data: None,
            presentation_data: None,
            infographic_image_url: None,
            tags: "[]".to_string(),
            is_pinned: false,
            is_archived: false,
            color: "#3B82F6".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let resp = NoteResponse::from_db_note(note);
        assert!(resp.quiz_data.is_none());
        assert!(resp.sources.is_empty());
    }
}
