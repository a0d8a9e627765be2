//! Source model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user-uploaded document used as grounding context for generation.
///
/// `content` holds the raw upload (base64 for PDFs, plain text otherwise);
/// `metadata` is a JSON blob that carries the extracted text for PDFs
/// under the `text` key, and `extraction_error` when extraction failed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Source {
    /// Row id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Display name, usually the uploaded file name
    pub name: String,

    /// Raw content (base64 PDF payload or plain text)
    pub content: String,

    /// Source kind: file, link, text, youtube
    pub source_type: String,

    /// File extension hint (e.g. "pdf")
    pub file_type: String,

    /// Raw content length in bytes
    pub size: i64,

    /// Whether the source is enabled for generation
    pub is_active: bool,

    /// Metadata blob as JSON string
    pub metadata: String,

    /// Tags as a JSON string array
    pub tags: String,

    /// Creation timestamp (RFC3339 string)
    pub created_at: String,

    /// Last update timestamp (RFC3339 string)
    pub updated_at: String,
}

impl Source {
    /// The text usable for prompt context: extracted text when present,
    /// raw content otherwise.
    pub fn usable_text(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.metadata)
            .ok()
            .and_then(|meta| meta.get("text").and_then(|t| t.as_str()).map(str::to_string))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| self.content.clone())
    }

    /// Whether this source looks like a PDF upload.
    pub fn is_pdf(&self) -> bool {
        self.file_type.eq_ignore_ascii_case("pdf")
            || self.name.to_lowercase().ends_with(".pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(metadata: &str, content: &str) -> Source {
        Source {
            id: 1,
            user_id: 1,
            name: "Lecture.pdf".to_string(),
            content: content.to_string(),
            source_type: "file".to_string(),
            file_type: "pdf".to_string(),
            size: content.len() as i64,
            is_active: true,
            metadata: metadata.to_string(),
            tags: "[]".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_usable_text_prefers_extracted() {
        let s = source(r#"{"text":"extracted words"}"#, "base64stuff");
        assert_eq!(s.usable_text(), "extracted words");
    }

    #[test]
    fn test_usable_text_falls_back_to_content() {
        let s = source("{}", "plain text body");
        assert_eq!(s.usable_text(), "plain text body");

        let empty_text = source(r#"{"text":""}"#, "plain text body");
        assert_eq!(empty_text.usable_text(), "plain text body");
    }

    #[test]
    fn test_is_pdf_by_extension_and_type() {
        assert!(source("{}", "").is_pdf());

        let mut txt = source("{}", "");
        txt.file_type = "txt".to_string();
        txt.name = "notes.txt".to_string();
        assert!(!txt.is_pdf());

        txt.name = "Slides.PDF".to_string();
        assert!(txt.is_pdf());
    }
}
