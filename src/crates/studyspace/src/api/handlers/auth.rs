//! Auth endpoint handlers
//!
//! Registration, login, profile management, and logout. Passwords are
//! bcrypt-hashed before they touch the database; responses never carry
//! the hash.

use axum::{extract::State, Json};
use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::AuthUser;
use crate::api::models::{
    AuthData, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::api::response;
use crate::api::routes::AppState;
use crate::db::repositories::{ProfileUpdate, UserRepository};
use crate::services::auth::{hash_password, verify_password};

/// Register a new account
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let pool = state.db.pool();

    // id 0 never exists, so nothing is excluded from the check.
    if UserRepository::identity_taken(pool, 0, Some(&req.username), Some(&req.email)).await? {
        return Err(ApiError::Conflict(
            "A user with this username or email already exists".to_string(),
        ));
    }

    let hash = hash_password(&req.password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let user = UserRepository::create(pool, &req.username, &req.email, &hash).await?;
    let token = state
        .jwt
        .issue_token(user.id)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::info!("Registered user: {}", user.username);
    Ok(response::created(AuthData {
        token,
        user: UserResponse::from_db_user(user),
    }))
}

/// Log in with username (or email) and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    let pool = state.db.pool();
    let user = UserRepository::find_by_identity(pool, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = verify_password(&req.password, &user.password)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    UserRepository::touch_last_login(pool, user.id).await?;
    let token = state
        .jwt
        .issue_token(user.id)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::info!("User logged in: {}", user.username);
    Ok(response::ok(AuthData {
        token,
        user: UserResponse::from_db_user(user),
    }))
}

/// Get the authenticated user's profile
///
/// GET /api/auth/profile
pub async fn get_profile(AuthUser(user): AuthUser) -> ApiResult<impl axum::response::IntoResponse> {
    Ok(response::ok(UserResponse::from_db_user(user)))
}

/// Update the authenticated user's profile
///
/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    req.validate()?;

    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    if UserRepository::identity_taken(pool, user.id, req.username.as_deref(), req.email.as_deref())
        .await?
    {
        return Err(ApiError::Conflict(
            "Username or email is already taken".to_string(),
        ));
    }

    let password_hash = req
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    // Settings are merged into the stored blob, not replaced.
    let settings = match req.settings {
        Some(new_settings) => {
            let mut current: serde_json::Value = serde_json::from_str(&user.settings)
                .unwrap_or_else(|_| json!({}));
            if let (Some(current), Some(new_settings)) =
                (current.as_object_mut(), new_settings.as_object())
            {
                for (key, value) in new_settings {
                    current.insert(key.clone(), value.clone());
                }
            }
            Some(current.to_string())
        }
        None => None,
    };

    let update = ProfileUpdate {
        username: req.username,
        email: req.email,
        avatar: req.avatar,
        password_hash,
        settings,
    };

    let updated = UserRepository::update_profile(pool, user.id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!("Updated profile for user: {}", updated.username);
    Ok(response::ok(UserResponse::from_db_user(updated)))
}

/// Log out (token invalidation is client-side; this is an acknowledgment)
///
/// POST /api/auth/logout
pub async fn logout(AuthUser(user): AuthUser) -> ApiResult<impl axum::response::IntoResponse> {
    tracing::info!("User logged out: {}", user.username);
    Ok(response::ok(json!({ "message": "Logged out successfully" })))
}
