//! Server configuration
//!
//! Loads and parses studyspace-server.toml with server, database, auth,
//! and LLM settings. Every field has a default and can be overridden by
//! environment variables, so the server also runs with no config file at
//! all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server display name
    pub name: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "studyspace".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file path
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "studyspace.sqlite".to_string(),
        }
    }
}

/// Auth settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// HS256 JWT signing secret (at least 32 characters). Usually set
    /// through the JWT_SECRET environment variable rather than the file.
    pub jwt_secret: Option<String>,
    /// Token lifetime in days
    pub token_ttl_days: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_days: 7,
        }
    }
}

/// OpenRouter settings for the generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API base URL
    pub base_url: String,
    /// Chat model for materials, summaries, and chat
    pub chat_model: String,
    /// Primary image model for infographics
    pub image_model: String,
    /// Server-side API key; requests may override it per call
    pub api_key: Option<String>,
    /// HTTP-Referer tracking header value
    pub referer: Option<String>,
    /// X-Title tracking header value
    pub app_title: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: llm::DEFAULT_BASE_URL.to_string(),
            chat_model: llm::DEFAULT_CHAT_MODEL.to_string(),
            image_model: llm::DEFAULT_IMAGE_MODEL.to_string(),
            api_key: None,
            referer: None,
            app_title: "studyspace".to_string(),
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub llm: LlmSettings,
}

impl ServerConfig {
    /// Load configuration from the default location, or CONFIG_PATH when
    /// set, then apply environment overrides.
    pub fn load() -> Result<Self, ServerConfigError> {
        let path = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/studyspace-server.toml"));
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, then apply environment
    /// overrides.
    pub fn load_from(path: &Path) -> Result<Self, ServerConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ServerConfigError::ReadError)?;
        let mut config: ServerConfig =
            toml::from_str(&raw).map_err(ServerConfigError::ParseError)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults plus environment overrides
    /// (used when no config file is present).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// SQLite connection string for the configured database path.
    pub fn database_url(&self) -> String {
        format!("sqlite:{}", self.database.path)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            self.llm.api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<(), ServerConfigError> {
        if self.database.path.is_empty() {
            return Err(ServerConfigError::InvalidConfig(
                "database.path cannot be empty".to_string(),
            ));
        }
        if let Some(secret) = &self.auth.jwt_secret {
            if secret.len() < 32 {
                return Err(ServerConfigError::InvalidConfig(
                    "auth.jwt_secret must be at least 32 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}
