//! Bearer-token authentication extractor
//!
//! Handlers that take an [`AuthUser`] argument only run for requests
//! carrying a valid `Authorization: Bearer <jwt>` header whose subject is
//! an active user; everything else is rejected with 401 before the
//! handler body runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::db::models::User;
use crate::db::repositories::UserRepository;

/// The authenticated user behind the request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Token not provided".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Token not provided".to_string()))?;

        let user_id = state
            .jwt
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

        let user = UserRepository::get_active_by_id(state.db.pool(), user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Ok(AuthUser(user))
    }
}
