//! Authenticated-user extraction — bearer token verification plus local
//! identity resolution.
//!
//! Handlers guard themselves by taking an [`AuthenticatedUser`] parameter;
//! the extractor rejects with a uniform 401 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use licensehub_core::auth::jwt::verify_access_token;
use licensehub_core::auth::queries;
use licensehub_core::models::auth::User;

use crate::AppState;
use crate::error::AppError;

/// The resolved local identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

        let claims = verify_access_token(
            token,
            state.config.auth.jwt_secret.as_bytes(),
            state.config.auth.jwt_algorithm,
        )
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

        // A token whose subject no longer resolves locally is reported
        // exactly like an invalid token.
        let user = queries::find_user_by_subject(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(Self(user))
    }
}
