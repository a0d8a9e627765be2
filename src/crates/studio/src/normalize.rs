//! Response-shape normalization for AI payloads.
//!
//! Model responses for the same material arrive in several shapes: a bare
//! array instead of a titled object, `front`/`back` or `q`/`a` instead of
//! `question`/`answer`, snake_case instead of camelCase indexes. Each
//! normalizer accepts every shape seen in the wild and returns the one
//! canonical type, or [`StudioError::UnrecognizedShape`] when nothing
//! usable can be extracted.

use serde_json::Value;
use tracing::warn;

use crate::error::{Result, StudioError};
use crate::materials::{
    Flashcard, FlashcardData, MaterialPayload, MindMapData, MindMapNode, PresentationData,
    QuizData, QuizQuestion, Slide, StudyMaterialType,
};

/// Strip a markdown code fence wrapper (```json ... ```) from a model
/// response, if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return trimmed,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parse and normalize a raw model response for the given material type.
///
/// Summaries are passed through as trimmed text; structured types are
/// parsed as JSON (after fence stripping) and coerced into their
/// canonical shape.
pub fn parse_material(material_type: StudyMaterialType, raw: &str) -> Result<MaterialPayload> {
    match material_type {
        StudyMaterialType::Summary => Ok(MaterialPayload::Summary(raw.trim().to_string())),
        StudyMaterialType::Infographic => Err(StudioError::InvalidPayload(
            "infographics are generated as images, not parsed from text".to_string(),
        )),
        StudyMaterialType::Quiz => Ok(MaterialPayload::Quiz(normalize_quiz(&parse_json(raw)?)?)),
        StudyMaterialType::Flashcard => Ok(MaterialPayload::Flashcard(normalize_flashcards(
            &parse_json(raw)?,
        )?)),
        StudyMaterialType::MindMap => Ok(MaterialPayload::MindMap(normalize_mind_map(
            &parse_json(raw)?,
        )?)),
        StudyMaterialType::Presentation => Ok(MaterialPayload::Presentation(
            normalize_presentation(&parse_json(raw)?)?,
        )),
    }
}

fn parse_json(raw: &str) -> Result<Value> {
    Ok(serde_json::from_str(strip_code_fences(raw))?)
}

/// Coerce a flashcard payload into the canonical `{title, cards}` shape.
///
/// Accepted inputs: the canonical object, a bare array of cards, and
/// per-card aliases `front`/`back` and `q`/`a`. Cards with both sides
/// empty are dropped.
pub fn normalize_flashcards(value: &Value) -> Result<FlashcardData> {
    let (title, raw_cards) = match value {
        Value::Array(cards) => (None, cards.as_slice()),
        Value::Object(obj) => {
            let cards = obj
                .get("cards")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    StudioError::UnrecognizedShape("flashcard object without cards array".to_string())
                })?;
            (string_field(obj, "title"), cards.as_slice())
        }
        _ => {
            return Err(StudioError::UnrecognizedShape(
                "flashcard payload is neither array nor object".to_string(),
            ))
        }
    };

    let cards: Vec<Flashcard> = raw_cards
        .iter()
        .filter_map(normalize_card)
        .collect();

    if cards.is_empty() {
        return Err(StudioError::UnrecognizedShape(
            "no usable flashcards in payload".to_string(),
        ));
    }

    Ok(FlashcardData {
        title: title.unwrap_or_else(|| "Flashcards".to_string()),
        cards,
    })
}

fn normalize_card(value: &Value) -> Option<Flashcard> {
    let obj = value.as_object()?;
    let question = first_string(obj, &["question", "front", "q"]).unwrap_or_default();
    let answer = first_string(obj, &["answer", "back", "a"]).unwrap_or_default();
    if question.is_empty() && answer.is_empty() {
        return None;
    }
    Some(Flashcard { question, answer })
}

/// Coerce a quiz payload into the canonical `{title, questions}` shape.
///
/// Accepted inputs: the canonical object and a bare array of questions;
/// the correct index may arrive as `correctAnswerIndex`,
/// `correct_answer_index`, or `answerIndex`/`answer_index`.
pub fn normalize_quiz(value: &Value) -> Result<QuizData> {
    let (title, raw_questions) = match value {
        Value::Array(questions) => (None, questions.as_slice()),
        Value::Object(obj) => {
            let questions = obj
                .get("questions")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    StudioError::UnrecognizedShape("quiz object without questions array".to_string())
                })?;
            (string_field(obj, "title"), questions.as_slice())
        }
        _ => {
            return Err(StudioError::UnrecognizedShape(
                "quiz payload is neither array nor object".to_string(),
            ))
        }
    };

    let mut questions = Vec::with_capacity(raw_questions.len());
    for raw in raw_questions {
        match normalize_question(raw) {
            Some(question) => questions.push(question),
            None => warn!("Dropping malformed quiz question: {}", raw),
        }
    }

    if questions.is_empty() {
        return Err(StudioError::UnrecognizedShape(
            "no usable questions in quiz payload".to_string(),
        ));
    }

    let quiz = QuizData {
        title: title.unwrap_or_else(|| "Quiz".to_string()),
        questions,
    };

    if !quiz.is_well_formed() {
        return Err(StudioError::InvalidPayload(
            "quiz has a question with too few options or an out-of-range answer index".to_string(),
        ));
    }

    Ok(quiz)
}

fn normalize_question(value: &Value) -> Option<QuizQuestion> {
    let obj = value.as_object()?;
    let question = first_string(obj, &["question", "q"])?;
    let options: Vec<String> = obj
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(value_to_string)
        .collect();
    let correct_answer_index = ["correctAnswerIndex", "correct_answer_index", "answerIndex", "answer_index"]
        .iter()
        .find_map(|key| obj.get(*key))
        .and_then(Value::as_u64)? as usize;
    let explanation = first_string(obj, &["explanation"]).unwrap_or_default();

    Some(QuizQuestion {
        question,
        options,
        correct_answer_index,
        explanation,
    })
}

/// Coerce a mind-map payload into the canonical `{title, rootNode}` shape.
/// The root may arrive as `rootNode`, `root_node`, or `root`.
pub fn normalize_mind_map(value: &Value) -> Result<MindMapData> {
    let obj = value.as_object().ok_or_else(|| {
        StudioError::UnrecognizedShape("mind map payload is not an object".to_string())
    })?;

    let root = ["rootNode", "root_node", "root"]
        .iter()
        .find_map(|key| obj.get(*key))
        .ok_or_else(|| StudioError::UnrecognizedShape("mind map without a root node".to_string()))?;

    let root_node = normalize_node(root).ok_or_else(|| {
        StudioError::UnrecognizedShape("mind map root node has no label".to_string())
    })?;

    Ok(MindMapData {
        title: string_field(obj, "title").unwrap_or_else(|| "Mind map".to_string()),
        root_node,
    })
}

fn normalize_node(value: &Value) -> Option<MindMapNode> {
    let obj = value.as_object()?;
    let label = string_field(obj, "label")?;
    let children = obj
        .get("children")
        .and_then(Value::as_array)
        .map(|kids| kids.iter().filter_map(normalize_node).collect())
        .unwrap_or_default();
    Some(MindMapNode { label, children })
}

/// Coerce a presentation payload into the canonical `{title, slides}`
/// shape. Slide `content` may arrive as an array of bullets or a single
/// string, which is wrapped.
pub fn normalize_presentation(value: &Value) -> Result<PresentationData> {
    let obj = value.as_object().ok_or_else(|| {
        StudioError::UnrecognizedShape("presentation payload is not an object".to_string())
    })?;

    let raw_slides = obj
        .get("slides")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            StudioError::UnrecognizedShape("presentation without a slides array".to_string())
        })?;

    let slides: Vec<Slide> = raw_slides.iter().filter_map(normalize_slide).collect();
    if slides.is_empty() {
        return Err(StudioError::UnrecognizedShape(
            "no usable slides in presentation payload".to_string(),
        ));
    }

    Ok(PresentationData {
        title: string_field(obj, "title").unwrap_or_else(|| "Presentation".to_string()),
        slides,
    })
}

fn normalize_slide(value: &Value) -> Option<Slide> {
    let obj = value.as_object()?;
    let title = string_field(obj, "title")?;
    let content = match obj.get("content") {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_string).collect(),
        Some(Value::String(text)) => vec![text.clone()],
        _ => Vec::new(),
    };
    Some(Slide {
        title,
        content,
        code: string_field(obj, "code"),
        image_url: first_string(obj, &["imageUrl", "image_url"]),
    })
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn first_string(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| string_field(obj, key))
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
