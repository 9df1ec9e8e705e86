//! Memo handlers.

use axum::Json;
use axum::extract::State;

use licensehub_core::licensing;
use licensehub_core::models::licensing::Memo;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AuthenticatedUser;
use crate::models::MemoCreate;

/// `POST /memos` — attach a memo to a record; the authenticated caller is
/// the author.
pub async fn create_memo_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<MemoCreate>,
) -> AppResult<Json<Memo>> {
    let memo = licensing::create_memo(
        &state.pool,
        user.id,
        &body.related_type,
        body.related_id,
        &body.content,
    )
    .await?;
    Ok(Json(memo))
}

/// `GET /memos` — list memos, newest first.
pub async fn list_memos_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Memo>>> {
    Ok(Json(licensing::list_memos(&state.pool).await?))
}
