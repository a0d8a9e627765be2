//! PDF text extraction for uploaded sources.
//!
//! PDF uploads arrive as base64, sometimes wrapped in a
//! `data:application/pdf` data URL. Extraction runs at upload time and
//! the text lands in the source's metadata blob; a failure is recorded
//! there too, so clients can tell a source has no usable text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur extracting text from an upload.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Content was not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The PDF parser rejected the document.
    #[error("PDF parsing failed: {0}")]
    Pdf(String),
}

/// Whether an upload should go through PDF extraction, judged by the
/// file-type hint or the file name.
pub fn looks_like_pdf(name: &str, file_type: &str) -> bool {
    file_type.eq_ignore_ascii_case("pdf") || name.to_lowercase().ends_with(".pdf")
}

/// Decode a (possibly data-URL wrapped) base64 PDF payload.
pub fn decode_pdf_payload(content: &str) -> Result<Vec<u8>, ExtractError> {
    let raw = if content.starts_with("data:application/pdf") {
        content.split_once(',').map(|(_, body)| body).unwrap_or("")
    } else {
        content
    };
    Ok(BASE64.decode(raw.trim())?)
}

/// Extract text from a base64 PDF payload.
pub fn extract_pdf_text(content: &str) -> Result<String, ExtractError> {
    let bytes = decode_pdf_payload(content)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Run extraction for a PDF upload and fold the outcome into the source
/// metadata blob: `text` on success, `extraction_error` on failure.
pub fn enrich_pdf_metadata(name: &str, content: &str, metadata: serde_json::Value) -> serde_json::Value {
    let mut metadata = match metadata {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    match extract_pdf_text(content) {
        Ok(text) => {
            metadata.insert("text".to_string(), serde_json::Value::String(text));
        }
        Err(err) => {
            warn!("PDF extraction failed for {}: {}", name, err);
            metadata.insert(
                "extraction_error".to_string(),
                serde_json::Value::String(err.to_string()),
            );
        }
    }

    serde_json::Value::Object(metadata)
}
