//! User model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default settings blob for new accounts.
pub const DEFAULT_SETTINGS: &str = r#"{"theme":"dark","language":"en","notifications":true}"#;

/// Represents a registered user.
///
/// `password` holds the bcrypt hash, never the plaintext. It is stripped
/// before the row crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Row id
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// bcrypt password hash
    pub password: String,

    /// Avatar URL or data URL, empty when unset
    pub avatar: String,

    /// Settings blob as JSON string
    pub settings: String,

    /// Account creation timestamp (RFC3339 string)
    pub created_at: String,

    /// Last login timestamp (RFC3339 string, optional)
    pub last_login: Option<String>,

    /// Soft-delete flag
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(DEFAULT_SETTINGS).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["notifications"], true);
    }
}
