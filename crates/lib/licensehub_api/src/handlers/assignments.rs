//! Seat assignment handlers.

use axum::Json;
use axum::extract::{Path, State};

use licensehub_core::licensing::{self, NewAssignment};
use licensehub_core::models::licensing::Assignment;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::AuthenticatedUser;
use crate::models::AssignmentCreate;

/// `POST /assignments` — assign a license seat. Requires authentication.
pub async fn create_assignment_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<AssignmentCreate>,
) -> AppResult<Json<Assignment>> {
    let new = NewAssignment {
        license_id: body.license_id,
        assigned_to_user_id: body.assigned_to_user_id,
        assigned_machine: body.assigned_machine,
        due_back_at: body.due_back_at,
    };
    let assignment = licensing::create_assignment(&state.pool, &new).await?;
    Ok(Json(assignment))
}

/// `GET /assignments` — list assignments.
pub async fn list_assignments_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Assignment>>> {
    Ok(Json(licensing::list_assignments(&state.pool).await?))
}

/// `POST /assignments/{assignment_id}/return` — mark an assignment returned.
/// Requires authentication.
pub async fn return_assignment_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(assignment_id): Path<i64>,
) -> AppResult<Json<Assignment>> {
    let assignment = licensing::return_assignment(&state.pool, assignment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".into()))?;
    Ok(Json(assignment))
}
