//! Error types for the domain core.

use thiserror::Error;

/// Result type for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Errors that can occur while normalizing and validating study materials.
#[derive(Debug, Error)]
pub enum StudioError {
    /// The payload did not match any accepted shape for the material type.
    #[error("Unrecognized payload shape: {0}")]
    UnrecognizedShape(String),

    /// The payload matched a known shape but violated a structural invariant.
    #[error("Invalid material payload: {0}")]
    InvalidPayload(String),

    /// Unknown material type label.
    #[error("Unknown material type: {0}")]
    UnknownMaterialType(String),

    /// Failed to parse the payload as JSON at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudioError {
    /// Check if this error means the model response was unusable
    /// (as opposed to a caller mistake).
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            StudioError::UnrecognizedShape(_)
                | StudioError::InvalidPayload(_)
                | StudioError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_shape_is_response_error() {
        let err = StudioError::UnrecognizedShape("no cards".to_string());
        assert!(err.is_response_error());
    }

    #[test]
    fn test_unknown_material_type_is_not_response_error() {
        let err = StudioError::UnknownMaterialType("poster".to_string());
        assert!(!err.is_response_error());
    }

    #[test]
    fn test_error_display() {
        let err = StudioError::InvalidPayload("empty options".to_string());
        assert!(format!("{}", err).contains("empty options"));
    }
}
