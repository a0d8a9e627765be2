//! Chat completions over the OpenRouter API.
//!
//! OpenRouter uses the OpenAI chat-completions wire format with extra
//! routing headers. Requests are built from role-tagged messages; JSON
//! mode (`response_format: json_object`) is used for structured material
//! generation so the model returns a bare JSON document.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OpenRouterConfig;
use crate::error::{LlmError, Result};

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Conversation messages, system prompt first.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature (provider default when None).
    pub temperature: Option<f32>,

    /// Completion token cap (provider default when None).
    pub max_tokens: Option<usize>,

    /// Ask the model for a bare JSON object response.
    pub json_mode: bool,
}

impl ChatRequest {
    /// Create a request from messages.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request a JSON-object response.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// A chat completion response.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    /// Assistant message content of the first choice.
    pub content: String,

    /// Model that actually served the request.
    pub model: String,

    /// Token usage, when reported.
    pub usage: Option<Usage>,
}

/// OpenRouter API client.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Send a chat completion request and return the first choice.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = WireChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            stream: false,
        };

        debug!(
            "Sending chat request: model={}, messages={}",
            self.config.model,
            request.messages.len()
        );

        let response = self.authorized(self.client.post(&url)).json(&body).send().await?;
        let response = Self::check_status(response).await?;

        let wire: WireChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            model: wire.model,
            usage: wire.usage,
        })
    }

    /// Attach the Authorization and OpenRouter tracking headers.
    pub(crate) fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut request =
            request.header("Authorization", format!("Bearer {}", self.config.api_key));
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.app_title {
            request = request.header("X-Title", title);
        }
        request
    }

    /// Map non-success HTTP statuses to typed errors.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 => LlmError::AuthenticationError(error_text),
            402 => LlmError::PaymentRequired(error_text),
            429 => LlmError::RateLimitExceeded(error_text),
            _ => LlmError::ProviderError(format!("OpenRouter API error {}: {}", status, error_text)),
        })
    }
}

// OpenRouter wire types (OpenAI-compatible).
#[derive(Debug, Serialize)]
struct WireChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct WireChatResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OpenRouterConfig {
        OpenRouterConfig::new("test-key", "google/gemini-2.0-flash-001")
    }

    #[test]
    fn test_client_creation() {
        let client = OpenRouterClient::new(config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, ChatRole::System);
        assert_eq!(ChatMessage::user("u").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("a").role, ChatRole::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_temperature(0.4)
            .with_max_tokens(1000)
            .with_json_mode(true);
        assert_eq!(request.temperature, Some(0.4));
        assert_eq!(request.max_tokens, Some(1000));
        assert!(request.json_mode);
    }

    #[test]
    fn test_wire_request_json_mode_serialization() {
        let messages = vec![ChatMessage::user("hi")];
        let body = WireChatRequest {
            model: "m",
            messages: &messages,
            temperature: None,
            max_tokens: None,
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_wire_response_parses_minimal_payload() {
        let raw = r#"{"model":"m","choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let wire: WireChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(wire.choices[0].message.content, "hello");
        assert!(wire.usage.is_none());
    }
}
