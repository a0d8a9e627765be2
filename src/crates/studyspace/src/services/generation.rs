//! AI generation pipeline.
//!
//! Ties the layers together for one material request: load the user's
//! sources, assemble budgeted context, build the prompt, call OpenRouter,
//! normalize the response shape, shuffle quiz options, and persist the
//! resulting note. Truncation is reported back to the caller.
//!
//! There is deliberately no retry or queueing here: a failed provider
//! call surfaces as an error for the client to show.

use thiserror::Error;
use tracing::warn;

use llm::{ChatMessage, ChatRequest, OpenRouterClient, OpenRouterConfig};
use studio::context::take_prefix;
use studio::prompts::{
    chat_system_prompt, infographic_prompt, material_prompt, summary_prompt, GenerationOptions,
};
use studio::{
    parse_material, shuffle_quiz_options, ContextBuilder, ContextSource, MaterialPayload,
    StudyMaterialType, MAX_SUMMARY_CHARS,
};

use crate::config::LlmSettings;
use crate::db::connection::DatabasePool;
use crate::db::models::{NewNote, Note, Source};
use crate::db::repositories::{NoteRepository, SourceRepository};
use crate::db::DatabaseError;

/// Errors that can occur in the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No requested source exists for this user.
    #[error("No usable sources selected")]
    NoSources,

    /// Neither the request nor the server carries an OpenRouter key.
    #[error("OpenRouter API key not configured")]
    MissingApiKey,

    /// Provider call failed.
    #[error(transparent)]
    Llm(#[from] llm::LlmError),

    /// Model response could not be coerced into the canonical shape.
    #[error(transparent)]
    Studio(#[from] studio::StudioError),

    /// Persistence failed.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for GenerationError {
    fn from(err: sqlx::Error) -> Self {
        GenerationError::Database(err.into())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Studio(err.into())
    }
}

/// A material generation request, already validated at the API boundary.
#[derive(Debug, Clone)]
pub struct MaterialRequest {
    pub material_type: StudyMaterialType,
    pub source_ids: Vec<i64>,
    pub options: GenerationOptions,
    pub api_key: Option<String>,
}

/// A generated material together with its truncation flag.
#[derive(Debug, Clone)]
pub struct GeneratedMaterial {
    pub note: Note,
    pub context_truncated: bool,
}

/// A chat reply together with its truncation flag.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub context_truncated: bool,
}

/// Run a material request end to end and persist the resulting note.
pub async fn generate_material(
    pool: &DatabasePool,
    settings: &LlmSettings,
    user_id: i64,
    request: &MaterialRequest,
) -> Result<GeneratedMaterial, GenerationError> {
    let sources = load_sources(pool, user_id, &request.source_ids).await?;
    let source_ids: Vec<i64> = sources.iter().map(|source| source.id).collect();

    let (payload, context_truncated) = match request.material_type {
        StudyMaterialType::Summary => summarize(settings, request, &sources).await?,
        StudyMaterialType::Infographic => infographic(settings, request, &sources).await?,
        _ => structured(settings, request, &sources).await?,
    };

    let note = persist_material(pool, user_id, &payload, source_ids).await?;
    Ok(GeneratedMaterial {
        note,
        context_truncated,
    })
}

/// Answer a chat turn grounded in the selected sources.
pub async fn chat_reply(
    pool: &DatabasePool,
    settings: &LlmSettings,
    user_id: i64,
    messages: &[ChatMessage],
    source_ids: &[i64],
    api_key: Option<&str>,
) -> Result<ChatReply, GenerationError> {
    let sources = if source_ids.is_empty() {
        Vec::new()
    } else {
        SourceRepository::get_many_for_user(pool, user_id, source_ids).await?
    };

    let built = (!sources.is_empty()).then(|| ContextBuilder::new().build(&context_sources(&sources)));
    let system = chat_system_prompt(built.as_ref().map(|b| b.text.as_str()));
    let context_truncated = built.as_ref().map(|b| b.truncated).unwrap_or(false);

    let mut conversation = Vec::with_capacity(messages.len() + 1);
    conversation.push(ChatMessage::system(system));
    conversation.extend(messages.iter().cloned());

    let client = build_client(settings, api_key, &settings.chat_model)?;
    let response = client
        .chat(&ChatRequest::new(conversation).with_temperature(0.4))
        .await?;

    Ok(ChatReply {
        reply: response.content,
        context_truncated,
    })
}

/// Parse, normalize, and post-process a structured model response:
/// quiz options get shuffled, and a count mismatch against the request
/// is logged (the material is still kept).
pub fn finalize_structured(
    material_type: StudyMaterialType,
    options: &GenerationOptions,
    raw: &str,
) -> Result<MaterialPayload, GenerationError> {
    let mut payload = parse_material(material_type, raw)?;

    if let MaterialPayload::Quiz(quiz) = payload {
        payload = MaterialPayload::Quiz(shuffle_quiz_options(quiz));
    }

    if let Some(expected) = options.expected_count(material_type) {
        let actual = match &payload {
            MaterialPayload::Quiz(data) => Some(data.questions.len()),
            MaterialPayload::Flashcard(data) => Some(data.cards.len()),
            MaterialPayload::Presentation(data) => Some(data.slides.len()),
            _ => None,
        };
        if let Some(actual) = actual {
            if actual != expected {
                warn!(
                    "Model returned {} {} items, expected {}",
                    actual, material_type, expected
                );
            }
        }
    }

    Ok(payload)
}

/// Persist a finished payload as a note, filling exactly the payload
/// column matching its kind.
pub async fn persist_material(
    pool: &DatabasePool,
    user_id: i64,
    payload: &MaterialPayload,
    source_ids: Vec<i64>,
) -> Result<Note, GenerationError> {
    let content = match payload {
        MaterialPayload::Quiz(data) => serde_json::to_string(data)?,
        MaterialPayload::Flashcard(data) => serde_json::to_string(data)?,
        MaterialPayload::MindMap(data) => serde_json::to_string(data)?,
        MaterialPayload::Presentation(data) => serde_json::to_string(data)?,
        MaterialPayload::Infographic { .. } => "Infographic image generated.".to_string(),
        MaterialPayload::Summary(text) => text.clone(),
    };

    let mut note = NewNote::new(payload.title(), content, payload.kind().as_str())
        .with_source_ids(source_ids);
    match payload {
        MaterialPayload::Quiz(data) => note.quiz_data = Some(serde_json::to_string(data)?),
        MaterialPayload::Flashcard(data) => {
            note.flashcard_data = Some(serde_json::to_string(data)?)
        }
        MaterialPayload::MindMap(data) => note.mind_map_data = Some(serde_json::to_string(data)?),
        MaterialPayload::Presentation(data) => {
            note.presentation_data = Some(serde_json::to_string(data)?)
        }
        MaterialPayload::Infographic { image_url } => {
            note.infographic_image_url = Some(image_url.clone())
        }
        MaterialPayload::Summary(_) => {}
    }

    Ok(NoteRepository::create(pool, user_id, &note).await?)
}

async fn structured(
    settings: &LlmSettings,
    request: &MaterialRequest,
    sources: &[Source],
) -> Result<(MaterialPayload, bool), GenerationError> {
    let built = ContextBuilder::new().build(&context_sources(sources));
    let prompt = material_prompt(request.material_type, &request.options, &built.text);

    let client = build_client(settings, request.api_key.as_deref(), &settings.chat_model)?;
    let response = client
        .chat(
            &ChatRequest::new(vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ])
            .with_json_mode(true),
        )
        .await?;

    let payload = finalize_structured(request.material_type, &request.options, &response.content)?;
    Ok((payload, built.truncated))
}

async fn summarize(
    settings: &LlmSettings,
    request: &MaterialRequest,
    sources: &[Source],
) -> Result<(MaterialPayload, bool), GenerationError> {
    let joined = join_source_texts(sources);
    let (trimmed, truncated) = take_prefix(&joined, MAX_SUMMARY_CHARS);
    let prompt = summary_prompt("Selected sources", trimmed);

    let client = build_client(settings, request.api_key.as_deref(), &settings.chat_model)?;
    let response = client
        .chat(
            &ChatRequest::new(vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ])
            .with_temperature(0.3),
        )
        .await?;

    Ok((
        MaterialPayload::Summary(response.content.trim().to_string()),
        truncated,
    ))
}

async fn infographic(
    settings: &LlmSettings,
    request: &MaterialRequest,
    sources: &[Source],
) -> Result<(MaterialPayload, bool), GenerationError> {
    let joined = join_source_texts(sources);
    let (context, truncated) = take_prefix(&joined, 2_000);
    let prompt = infographic_prompt(context, &request.options);

    let client = build_client(settings, request.api_key.as_deref(), &settings.chat_model)?;
    let image_url = client
        .generate_image_with_fallback(
            &settings.image_model,
            &prompt,
            request.options.layout.image_size(),
        )
        .await?;

    Ok((MaterialPayload::Infographic { image_url }, truncated))
}

async fn load_sources(
    pool: &DatabasePool,
    user_id: i64,
    ids: &[i64],
) -> Result<Vec<Source>, GenerationError> {
    if ids.is_empty() {
        return Err(GenerationError::NoSources);
    }
    let sources = SourceRepository::get_many_for_user(pool, user_id, ids).await?;
    if sources.is_empty() {
        return Err(GenerationError::NoSources);
    }
    Ok(sources)
}

fn context_sources(sources: &[Source]) -> Vec<ContextSource> {
    sources
        .iter()
        .map(|source| ContextSource::new(&source.name, source.usable_text()))
        .collect()
}

fn join_source_texts(sources: &[Source]) -> String {
    sources
        .iter()
        .filter_map(|source| {
            let text = source.usable_text();
            if text.is_empty() {
                None
            } else {
                Some(format!("# {}\n{}", source.name, text))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_client(
    settings: &LlmSettings,
    api_key: Option<&str>,
    model: &str,
) -> Result<OpenRouterClient, GenerationError> {
    let api_key = api_key
        .map(str::to_string)
        .or_else(|| settings.api_key.clone())
        .ok_or(GenerationError::MissingApiKey)?;

    let mut config =
        OpenRouterConfig::new(api_key, model).with_base_url(settings.base_url.clone());
    config.referer = settings.referer.clone();
    config.app_title = Some(settings.app_title.clone());

    Ok(OpenRouterClient::new(config)?)
}
