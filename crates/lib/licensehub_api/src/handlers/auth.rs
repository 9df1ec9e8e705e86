//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AuthenticatedUser;
use crate::models::{CurrentUserResponse, LoginRequest, TokenResponse};
use crate::services::auth;

/// `POST /auth/login` — verify credentials against the directory and issue a
/// bearer token.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &state.directory,
        &state.config.auth,
        &body.username,
        &body.password,
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /auth/me` — profile of the authenticated caller.
pub async fn me_handler(AuthenticatedUser(user): AuthenticatedUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(user))
}
