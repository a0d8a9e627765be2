//! Authentication service
//!
//! bcrypt password hashing and HS256 JWT management. Tokens carry the
//! user id in `sub` and expire after the configured TTL (7 days by
//! default, matching the session length the clients expect).

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::db::connection::DatabasePool;
use crate::db::repositories::UserRepository;

/// bcrypt work factor, matching the original deployment.
pub const BCRYPT_COST: u32 = 10;

/// Errors that can occur in the auth service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// JWT secret missing from config and environment.
    #[error("JWT secret not configured")]
    MissingSecret,

    /// JWT secret too short to be safe.
    #[error("JWT secret must be at least 32 characters")]
    WeakSecret,

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token encoding/decoding failed.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Token decoded but its claims are unusable.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Hash a password with the standard work factor.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Token claims: user id in `sub`, issued-at and expiry as Unix seconds.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// JWT token management
pub struct JwtManager {
    secret: String,
    issuer: String,
    ttl_days: i64,
}

impl JwtManager {
    /// Create a new JWT manager
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret, at least 32 characters
    /// * `ttl_days` - Token lifetime in days
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.len() < 32 {
            return Err(AuthError::WeakSecret);
        }

        Ok(Self {
            secret,
            issuer: "studyspace".to_string(),
            ttl_days,
        })
    }

    /// Create a JWT manager from the JWT_SECRET environment variable
    pub fn from_env() -> Result<Self, AuthError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| AuthError::MissingSecret)?;
        Self::new(secret, 7)
    }

    /// Generate a token for a user id
    pub fn issue_token(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(self.ttl_days)).timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Validate a token and return the user id it was issued for
    pub fn validate_token(&self, token: &str) -> Result<i64, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))
    }
}

/// Seed the demo admin account (admin/admin123) if it does not exist yet.
pub async fn ensure_admin_user(pool: &DatabasePool) -> Result<(), crate::db::DatabaseError> {
    if UserRepository::find_by_username(pool, "admin").await?.is_some() {
        return Ok(());
    }

    let hash = hash_password("admin123")
        .map_err(|e| crate::db::DatabaseError::Other(format!("admin seed failed: {}", e)))?;
    UserRepository::create(pool, "admin", "admin@example.com", &hash).await?;
    info!("Seeded default admin user");
    Ok(())
}
