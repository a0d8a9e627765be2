//! Configuration for the OpenRouter client.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default chat model used for material generation and summaries.
pub const DEFAULT_CHAT_MODEL: &str = "google/gemini-2.0-flash-001";

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

/// OpenRouter client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Model name/identifier (e.g. "google/gemini-2.0-flash-001").
    pub model: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Value for the `HTTP-Referer` tracking header (optional).
    pub referer: Option<String>,

    /// Value for the `X-Title` tracking header (optional).
    pub app_title: Option<String>,
}

impl OpenRouterConfig {
    /// Create a new configuration with the default base URL.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            timeout: default_timeout(),
            referer: None,
            app_title: None,
        }
    }

    /// Create configuration from an environment variable holding the key.
    pub fn from_env(env_var: &str, model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .map_err(|_| LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var)))?;

        Ok(Self::new(api_key, model))
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the referer and title headers used for OpenRouter tracking.
    pub fn with_app(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self.app_title = Some(title.into());
        self
    }

    /// Return a copy of this configuration pointed at a different model.
    pub fn for_model(&self, model: impl Into<String>) -> Self {
        let mut config = self.clone();
        config.model = model.into();
        config
    }
}
