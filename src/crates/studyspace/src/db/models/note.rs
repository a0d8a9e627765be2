//! Note model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A generated study material or free-text note.
///
/// Exactly one of the typed payload columns is populated, and only when
/// `note_type` matches it; the rest stay NULL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Row id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Note title
    pub title: String,

    /// Text content (summary text, or the serialized payload for
    /// structured materials)
    pub content: String,

    /// Material kind label: quiz, flashcard, mindmap, presentation,
    /// infographic, summary
    pub note_type: String,

    /// Number of sources used to produce this note
    pub source_count: i64,

    /// Source ids used, as a JSON string array
    pub sources: String,

    /// Quiz payload as JSON (only when note_type = "quiz")
    pub quiz_data: Option<String>,

    /// Flashcard payload as JSON (only when note_type = "flashcard")
    pub flashcard_data: Option<String>,

    /// Mind-map payload as JSON (only when note_type = "mindmap")
    pub mind_map_data: Option<String>,

    /// Presentation payload as JSON (only when note_type = "presentation")
    pub presentation_data: Option<String>,

    /// Generated infographic image (data URL, only when note_type = "infographic")
    pub infographic_image_url: Option<String>,

    /// Tags as a JSON string array
    pub tags: String,

    /// Pinned notes sort first
    pub is_pinned: bool,

    /// Archived notes are hidden from listings
    pub is_archived: bool,

    /// Display color
    pub color: String,

    /// Creation timestamp (RFC3339 string)
    pub created_at: String,

    /// Last update timestamp (RFC3339 string)
    pub updated_at: String,
}

/// Fields for inserting a new note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub note_type: String,
    pub source_ids: Vec<i64>,
    pub quiz_data: Option<String>,
    pub flashcard_data: Option<String>,
    pub mind_map_data: Option<String>,
    pub presentation_data: Option<String>,
    pub infographic_image_url: Option<String>,
    pub tags: Vec<String>,
    pub color: Option<String>,
    pub is_pinned: bool,
}

impl NewNote {
    /// Create a new note with required fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        note_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            note_type: note_type.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the source ids used.
    pub fn with_source_ids(mut self, source_ids: Vec<i64>) -> Self {
        self.source_ids = source_ids;
        self
    }

    /// Check that at most the payload matching `note_type` is set.
    pub fn payload_matches_type(&self) -> bool {
        let slots = [
            ("quiz", self.quiz_data.is_some()),
            ("flashcard", self.flashcard_data.is_some()),
            ("mindmap", self.mind_map_data.is_some()),
            ("presentation", self.presentation_data.is_some()),
            ("infographic", self.infographic_image_url.is_some()),
        ];
        slots
            .iter()
            .all(|(kind, present)| !present || *kind == self.note_type)
    }
}
