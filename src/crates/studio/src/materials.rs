//! Canonical study-material schemas.
//!
//! One typed shape per material kind, matching the JSON the generation
//! prompts ask the model for. Field names serialize in camelCase because
//! that is the wire shape clients already consume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudioError;

/// Kinds of study material the workspace can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMaterialType {
    /// Multiple-choice quiz
    Quiz,
    /// Two-sided study cards
    Flashcard,
    /// Hierarchical mind map
    #[serde(rename = "mindmap")]
    MindMap,
    /// Slide deck outline
    Presentation,
    /// Generated infographic image
    Infographic,
    /// Free-text bullet summary
    Summary,
}

impl StudyMaterialType {
    /// All material kinds, in display order.
    pub const ALL: [StudyMaterialType; 6] = [
        StudyMaterialType::Quiz,
        StudyMaterialType::Flashcard,
        StudyMaterialType::MindMap,
        StudyMaterialType::Presentation,
        StudyMaterialType::Infographic,
        StudyMaterialType::Summary,
    ];

    /// The lowercase label used in API payloads and the notes table.
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyMaterialType::Quiz => "quiz",
            StudyMaterialType::Flashcard => "flashcard",
            StudyMaterialType::MindMap => "mindmap",
            StudyMaterialType::Presentation => "presentation",
            StudyMaterialType::Infographic => "infographic",
            StudyMaterialType::Summary => "summary",
        }
    }

    /// Whether generation for this kind expects a structured JSON response.
    pub fn is_structured(&self) -> bool {
        !matches!(
            self,
            StudyMaterialType::Summary | StudyMaterialType::Infographic
        )
    }
}

impl fmt::Display for StudyMaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyMaterialType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(StudyMaterialType::Quiz),
            "flashcard" => Ok(StudyMaterialType::Flashcard),
            "mindmap" => Ok(StudyMaterialType::MindMap),
            "presentation" => Ok(StudyMaterialType::Presentation),
            "infographic" => Ok(StudyMaterialType::Infographic),
            "summary" => Ok(StudyMaterialType::Summary),
            other => Err(StudioError::UnknownMaterialType(other.to_string())),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,

    /// Answer options, usually four
    pub options: Vec<String>,

    /// Index into `options` of the correct answer
    pub correct_answer_index: usize,

    /// Short explanation shown after answering
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Check that the question has at least two options and the correct
    /// index points at one of them.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.correct_answer_index < self.options.len()
    }
}

/// A generated quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizData {
    /// Quiz title
    pub title: String,

    /// Questions in presentation order
    pub questions: Vec<QuizQuestion>,
}

impl QuizData {
    /// Check that the quiz is non-empty and every question is well formed.
    pub fn is_well_formed(&self) -> bool {
        !self.questions.is_empty() && self.questions.iter().all(QuizQuestion::is_well_formed)
    }
}

/// One two-sided study card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Front of the card
    pub question: String,

    /// Back of the card
    pub answer: String,
}

/// A generated flashcard deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardData {
    /// Deck title
    pub title: String,

    /// Cards in presentation order
    pub cards: Vec<Flashcard>,
}

/// A node in a mind map. `children` is empty at the leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    /// Node label
    pub label: String,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    /// Create a leaf node.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MindMapNode::node_count).sum::<usize>()
    }
}

/// A generated mind map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapData {
    /// Map title
    pub title: String,

    /// Central node of the map
    pub root_node: MindMapNode,
}

/// One slide of a presentation outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide title
    pub title: String,

    /// Bullet points
    pub content: Vec<String>,

    /// Optional code snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Optional generated illustration (data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A generated presentation outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationData {
    /// Presentation title
    pub title: String,

    /// Slides in order
    pub slides: Vec<Slide>,
}

/// A typed material payload. A note carries exactly the variant matching
/// its material type; the other payload columns stay empty.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialPayload {
    Quiz(QuizData),
    Flashcard(FlashcardData),
    MindMap(MindMapData),
    Presentation(PresentationData),
    Infographic { image_url: String },
    Summary(String),
}

impl MaterialPayload {
    /// The material kind this payload belongs to.
    pub fn kind(&self) -> StudyMaterialType {
        match self {
            MaterialPayload::Quiz(_) => StudyMaterialType::Quiz,
            MaterialPayload::Flashcard(_) => StudyMaterialType::Flashcard,
            MaterialPayload::MindMap(_) => StudyMaterialType::MindMap,
            MaterialPayload::Presentation(_) => StudyMaterialType::Presentation,
            MaterialPayload::Infographic { .. } => StudyMaterialType::Infographic,
            MaterialPayload::Summary(_) => StudyMaterialType::Summary,
        }
    }

    /// Default note title for this payload, preferring the model's own title.
    pub fn title(&self) -> String {
        match self {
            MaterialPayload::Quiz(data) if !data.title.is_empty() => data.title.clone(),
            MaterialPayload::Flashcard(data) if !data.title.is_empty() => data.title.clone(),
            MaterialPayload::MindMap(data) if !data.title.is_empty() => data.title.clone(),
            MaterialPayload::Presentation(data) if !data.title.is_empty() => data.title.clone(),
            MaterialPayload::Quiz(_) => "Quiz".to_string(),
            MaterialPayload::Flashcard(_) => "Flashcards".to_string(),
            MaterialPayload::MindMap(_) => "Mind map".to_string(),
            MaterialPayload::Presentation(_) => "Presentation".to_string(),
            MaterialPayload::Infographic { .. } => "Infographic".to_string(),
            MaterialPayload::Summary(_) => "Summary".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_type_round_trip() {
        for kind in StudyMaterialType::ALL {
            let parsed: StudyMaterialType = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_material_type_unknown() {
        let parsed: Result<StudyMaterialType, _> = "poster".parse();
        assert!(parsed.is_err());
    }

    #[test]
    fn test_quiz_question_serde_camel_case() {
        let question = QuizQuestion {
            question: "2 + 2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            correct_answer_index: 1,
            explanation: "Basic arithmetic".to_string(),
        };
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["correctAnswerIndex"], 1);
    }

    #[test]
    fn test_quiz_well_formed() {
        let quiz = QuizData {
            title: "Test".to_string(),
            questions: vec![QuizQuestion {
                question: "Q".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer_index: 0,
                explanation: String::new(),
            }],
        };
        assert!(quiz.is_well_formed());
    }

    #[test]
    fn test_quiz_out_of_range_index_not_well_formed() {
        let quiz = QuizData {
            title: "Test".to_string(),
            questions: vec![QuizQuestion {
                question: "Q".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer_index: 5,
                explanation: String::new(),
            }],
        };
        assert!(!quiz.is_well_formed());
    }

    #[test]
    fn test_empty_quiz_not_well_formed() {
        let quiz = QuizData {
            title: "Test".to_string(),
            questions: vec![],
        };
        assert!(!quiz.is_well_formed());
    }

    #[test]
    fn test_mind_map_node_count() {
        let map = MindMapNode {
            label: "root".to_string(),
            children: vec![MindMapNode::leaf("a"), MindMapNode::leaf("b")],
        };
        assert_eq!(map.node_count(), 3);
    }

    #[test]
    fn test_mind_map_serde_root_node() {
        let data = MindMapData {
            title: "Map".to_string(),
            root_node: MindMapNode::leaf("center"),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("rootNode").is_some());
    }

    #[test]
    fn test_payload_kind_and_title() {
        let payload = MaterialPayload::Flashcard(FlashcardData {
            title: "Anatomy".to_string(),
            cards: vec![],
        });
        assert_eq!(payload.kind(), StudyMaterialType::Flashcard);
        assert_eq!(payload.title(), "Anatomy");

        let untitled = MaterialPayload::Summary("three points".to_string());
        assert_eq!(untitled.title(), "Summary");
    }
}
