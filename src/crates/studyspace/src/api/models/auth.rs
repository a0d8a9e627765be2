//! Auth API models and DTOs

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validation::{validate_min_length, validate_not_empty, validate_string_length};
use crate::db::models::User;

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Plaintext password, hashed server-side
    pub password: String,
}

impl RegisterRequest {
    /// Validate the register request
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.username, "username")?;
        validate_string_length(&self.username, "username", 1, 64)?;
        validate_not_empty(&self.email, "email")?;
        validate_min_length(&self.password, "password", 6)?;
        Ok(())
    }
}

/// Request to log in; `username` also accepts the email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Validate the login request
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_empty(&self.username, "username")?;
        validate_not_empty(&self.password, "password")?;
        Ok(())
    }
}

/// Request to update the profile; absent fields stay unchanged.
/// `settings` is merged into the stored settings blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
    pub settings: Option<serde_json::Value>,
}

impl UpdateProfileRequest {
    /// Check if any fields are being updated
    pub fn has_updates(&self) -> bool {
        self.username.is_some()
            || self.email.is_some()
            || self.avatar.is_some()
            || self.password.is_some()
            || self.settings.is_some()
    }

    /// Validate the update request
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(username) = &self.username {
            validate_not_empty(username, "username")?;
            validate_string_length(username, "username", 1, 64)?;
        }
        if let Some(email) = &self.email {
            validate_not_empty(email, "email")?;
        }
        if let Some(password) = &self.password {
            validate_min_length(password, "password", 6)?;
        }
        Ok(())
    }
}

/// Sanitized user for API responses (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub settings: serde_json::Value,
    pub created_at: String,
    pub last_login: Option<String>,
}

impl UserResponse {
    /// Create a UserResponse from the database User model
    pub fn from_db_user(user: User) -> Self {
        let settings = serde_json::from_str(&user.settings)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            settings,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// Token plus sanitized user, returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_profile_has_updates() {
        assert!(!UpdateProfileRequest::default().has_updates());

        let req = UpdateProfileRequest {
            avatar: Some("x".to_string()),
            ..UpdateProfileRequest::default()
        };
        assert!(req.has_updates());
    }

    #[test]
    fn test_user_response_parses_settings() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "a@example.com".to_string(),
            password: "hash".to_string(),
            avatar: String::new(),
            settings: r#"{"theme":"dark"}"#.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            last_login: None,
            is_active: true,
        };
        let resp = UserResponse::from_db_user(user);
        assert_eq!(resp.settings["theme"], "dark");

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
