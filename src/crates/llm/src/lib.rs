//! OpenRouter client for studyspace.
//!
//! OpenRouter exposes an OpenAI-compatible API that routes requests to
//! multiple hosted providers. This crate wraps the two endpoints the
//! workspace uses:
//!
//! - `/chat/completions` for chat turns, summaries, and structured
//!   material generation (optionally in JSON mode), and
//! - `/images/generations` for infographic images, with a fallback chain
//!   across image models.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{ChatMessage, ChatRequest, OpenRouterClient, OpenRouterConfig};
//!
//! let config = OpenRouterConfig::from_env("OPENROUTER_API_KEY", "google/gemini-2.0-flash-001")?;
//! let client = OpenRouterClient::new(config)?;
//!
//! let request = ChatRequest::new(vec![
//!     ChatMessage::system("You are an expert tutor."),
//!     ChatMessage::user("Explain osmosis in two sentences."),
//! ]);
//! let response = client.chat(&request).await?;
//! println!("{}", response.content);
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod image;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, ChatRole, OpenRouterClient, Usage};
pub use config::{OpenRouterConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL};
pub use error::{LlmError, Result};
pub use image::{DEFAULT_IMAGE_MODEL, FALLBACK_IMAGE_MODELS};
