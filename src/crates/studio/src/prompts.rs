//! Prompt construction for material generation and chat.
//!
//! Each material kind gets a system prompt that pins the exact JSON shape
//! the normalizer expects and the exact item count the user asked for,
//! plus a user prompt carrying the assembled source context.

use serde::{Deserialize, Serialize};

use crate::materials::StudyMaterialType;

/// How many quiz questions to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizCount {
    Less,
    Standard,
    More,
}

impl QuizCount {
    /// Concrete question count for this setting.
    pub fn questions(self) -> usize {
        match self {
            QuizCount::Less => 5,
            QuizCount::Standard => 10,
            QuizCount::More => 20,
        }
    }
}

impl Default for QuizCount {
    fn default() -> Self {
        QuizCount::Standard
    }
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// How many flashcards to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCount {
    Less,
    Standard,
    More,
}

impl CardCount {
    /// Concrete card count for this setting.
    pub fn cards(self) -> usize {
        match self {
            CardCount::Less => 10,
            CardCount::Standard => 15,
            CardCount::More => 30,
        }
    }
}

impl Default for CardCount {
    fn default() -> Self {
        CardCount::Standard
    }
}

/// Flashcard emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Concepts,
    Definitions,
    Qa,
}

impl Default for CardStyle {
    fn default() -> Self {
        CardStyle::Concepts
    }
}

/// How many presentation slides to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideCount {
    Short,
    Standard,
    Detailed,
}

impl SlideCount {
    /// Concrete slide count for this setting.
    pub fn slides(self) -> usize {
        match self {
            SlideCount::Short => 5,
            SlideCount::Standard => 10,
            SlideCount::Detailed => 15,
        }
    }
}

impl Default for SlideCount {
    fn default() -> Self {
        SlideCount::Standard
    }
}

/// Presentation audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    General,
    Professional,
    Academic,
}

impl Default for Audience {
    fn default() -> Self {
        Audience::General
    }
}

/// Mind-map hierarchy depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Standard,
    Complex,
}

impl Default for Complexity {
    fn default() -> Self {
        Complexity::Standard
    }
}

/// Infographic visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfographicStyle {
    Minimalist,
    Detailed,
    Vibrant,
}

impl Default for InfographicStyle {
    fn default() -> Self {
        InfographicStyle::Detailed
    }
}

/// Infographic aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
}

impl Layout {
    /// Pixel size string accepted by the image generation endpoint.
    pub fn image_size(self) -> &'static str {
        match self {
            Layout::Square => "1024x1024",
            Layout::Portrait => "768x1024",
            Layout::Landscape => "1024x576",
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Square
    }
}

/// Knobs for a generation request. A single flat struct so it can arrive
/// as one JSON blob; each material kind reads only the fields it uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    pub question_count: QuizCount,
    pub difficulty: Difficulty,
    pub card_count: CardCount,
    pub card_style: CardStyle,
    pub slide_count: SlideCount,
    pub audience: Audience,
    pub complexity: Complexity,
    pub style: InfographicStyle,
    pub layout: Layout,
    pub topic: Option<String>,
}

impl GenerationOptions {
    /// Expected item count for the structured material kinds, if the
    /// kind has one.
    pub fn expected_count(&self, material_type: StudyMaterialType) -> Option<usize> {
        match material_type {
            StudyMaterialType::Quiz => Some(self.question_count.questions()),
            StudyMaterialType::Flashcard => Some(self.card_count.cards()),
            StudyMaterialType::Presentation => Some(self.slide_count.slides()),
            _ => None,
        }
    }
}

/// A system/user prompt pair ready to send to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the prompt pair for a structured material or summary request.
pub fn material_prompt(
    material_type: StudyMaterialType,
    options: &GenerationOptions,
    context: &str,
) -> PromptPair {
    let topic_hint = options
        .topic
        .as_deref()
        .map(|topic| format!(" Topic: {}.", topic))
        .unwrap_or_default();

    let system = match material_type {
        StudyMaterialType::Quiz => {
            let count = options.question_count.questions();
            let difficulty_hint = match options.difficulty {
                Difficulty::Hard => {
                    "Questions must be deep, analytical, and tricky (but with a single \
                     unambiguous answer). Pay attention to details."
                }
                Difficulty::Easy => "Questions should be simple and rely on core concepts.",
                Difficulty::Medium => "Questions should be of medium difficulty.",
            };
            format!(
                "You are an expert tutor.{topic_hint} Create a quiz with EXACTLY {count} \
                 QUESTIONS, each with 4 options. The count matters. {difficulty_hint}\n\
                 Return the answer as JSON in this format:\n\
                 {{\n  \"title\": \"Topic name\",\n  \"questions\": [\n    {{\n      \
                 \"question\": \"Question text\",\n      \"options\": [\"A\", \"B\", \"C\", \"D\"],\n      \
                 \"correctAnswerIndex\": 0,\n      \"explanation\": \"Explanation\"\n    }}\n  ]\n}}"
            )
        }
        StudyMaterialType::Flashcard => {
            let count = options.card_count.cards();
            let style_hint = match options.card_style {
                CardStyle::Concepts => "Focus on key concepts.",
                CardStyle::Definitions => "Focus on terms and their definitions.",
                CardStyle::Qa => "Use a question-and-answer drill style.",
            };
            format!(
                "Create study flashcards.{topic_hint} There must be EXACTLY {count} CARDS. \
                 {style_hint}\nReturn the answer as JSON in this format:\n\
                 {{\n  \"title\": \"Topic\",\n  \"cards\": [\n    \
                 {{ \"question\": \"Question\", \"answer\": \"Answer\" }}\n  ]\n}}"
            )
        }
        StudyMaterialType::MindMap => {
            let complexity_hint = match options.complexity {
                Complexity::Simple => "Keep the hierarchy simple",
                Complexity::Complex => "Make the hierarchy detailed",
                Complexity::Standard => "Use a moderate hierarchy",
            };
            format!(
                "Build a hierarchical mind map.{topic_hint} {complexity_hint}.\n\
                 Return the answer as JSON in this format:\n\
                 {{\n  \"title\": \"Topic\",\n  \"rootNode\": {{\n    \
                 \"label\": \"Central node\",\n    \"children\": [\n      \
                 {{ \"label\": \"Child node\", \"children\": [] }}\n    ]\n  }}\n}}"
            )
        }
        StudyMaterialType::Presentation => {
            let count = options.slide_count.slides();
            let audience_hint = match options.audience {
                Audience::General => "a general audience",
                Audience::Professional => "a professional audience",
                Audience::Academic => "an academic audience",
            };
            format!(
                "Create content for EXACTLY {count} SLIDES, aimed at {audience_hint}.{topic_hint}\n\
                 Return the answer as JSON in this format:\n\
                 {{\n  \"title\": \"Presentation topic\",\n  \"slides\": [\n    {{\n      \
                 \"title\": \"Slide title\",\n      \"content\": [\"Point 1\", \"Point 2\"]\n    }}\n  ]\n}}"
            )
        }
        StudyMaterialType::Summary | StudyMaterialType::Infographic => {
            "You are a sharp analyst. You convey information briefly and precisely.".to_string()
        }
    };

    let user = format!(
        "Create a {} based on the following sources:\n\n{}",
        material_type, context
    );

    PromptPair { system, user }
}

/// Build the prompt pair for summarizing a single source.
pub fn summary_prompt(source_name: &str, text: &str) -> PromptPair {
    PromptPair {
        system: "You are a sharp analyst. You convey information briefly and precisely."
            .to_string(),
        user: format!(
            "Analyze the following source and explain the 3-5 most important points as \
             short bullet points. No heading, just the points:\n\n[SOURCE: {}]\n{}",
            source_name, text
        ),
    }
}

/// Build the system prompt for a chat turn, grounded in source context
/// when any is available.
pub fn chat_system_prompt(context: Option<&str>) -> String {
    let grounding = match context {
        Some(context) if !context.is_empty() => format!(
            "You are a research assistant. Answer only from the content of the \
             following sources:\n{}",
            context
        ),
        _ => "You are a helpful AI assistant.".to_string(),
    };
    format!(
        "Your answers must be precise, academic, and grounded in the sources.\n\n{}",
        grounding
    )
}

/// Build the image prompt for an infographic request.
pub fn infographic_prompt(context: &str, options: &GenerationOptions) -> String {
    let style = match options.style {
        InfographicStyle::Minimalist => "minimalist, clean, simple, modern, white space, elegant",
        InfographicStyle::Detailed => "detailed, intricate, comprehensive, informative, data-rich",
        InfographicStyle::Vibrant => "vibrant, colorful, energetic, eye-catching, bold colors",
    };
    let layout = match options.layout {
        Layout::Square => "square layout, balanced composition",
        Layout::Portrait => "vertical layout, portrait orientation",
        Layout::Landscape => "horizontal layout, landscape orientation",
    };
    let topic = options.topic.as_deref().unwrap_or("information visualization");
    let (content, _) = crate::context::take_prefix(context, 500);

    format!(
        "Professional infographic illustration about: {}.\n\
         Style: {}.\n\
         Layout: {}.\n\
         Content: {}\n\
         Important: No text inside image, only visual elements.",
        topic, style, layout, content
    )
}
