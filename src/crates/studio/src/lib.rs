//! Domain core for the studyspace workspace.
//!
//! This crate holds everything that is independent of the HTTP server and
//! the LLM transport: the canonical study-material schemas, the character
//! budgeted context builder used for prompt assembly, the response-shape
//! normalizer that coerces heterogeneous AI payloads into those schemas,
//! the quiz option shuffler, and the prompt templates themselves.
//!
//! The design rule throughout is that shape coercion happens once, at this
//! boundary. Everything downstream (persistence, API responses) works with
//! the canonical types and never branches on payload shape.

pub mod context;
pub mod error;
pub mod materials;
pub mod normalize;
pub mod prompts;
pub mod shuffle;

pub use context::{
    BuiltContext, ContextBuilder, ContextSource, MAX_CONTEXT_CHARS, MAX_SOURCE_CHARS,
    MAX_SUMMARY_CHARS,
};
pub use error::{Result, StudioError};
pub use materials::{
    Flashcard, FlashcardData, MaterialPayload, MindMapData, MindMapNode, PresentationData,
    QuizData, QuizQuestion, Slide, StudyMaterialType,
};
pub use normalize::{
    normalize_flashcards, normalize_mind_map, normalize_presentation, normalize_quiz,
    parse_material, strip_code_fences,
};
pub use prompts::{GenerationOptions, PromptPair};
pub use shuffle::{shuffle_quiz_options, shuffle_quiz_options_with};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }
}
