//! License handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use licensehub_core::licensing::{self, NewLicense};
use licensehub_core::models::licensing::{License, LicenseType};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::AuthenticatedUser;
use crate::models::{ExpirationReport, LicenseCreate};

/// `POST /licenses` — create a license. Requires authentication.
pub async fn create_license_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<LicenseCreate>,
) -> AppResult<Json<License>> {
    let license_type = body
        .license_type
        .parse::<LicenseType>()
        .map_err(|_| AppError::Validation("Invalid license_type".into()))?;

    let new = NewLicense {
        product_id: body.product_id,
        license_key: body.license_key,
        license_type,
        seat_count: body.seat_count,
        start_date: body.start_date,
        end_date: body.end_date,
        maintenance_end_date: body.maintenance_end_date,
        purchase_order_id: body.purchase_order_id,
        owner_user_id: body.owner_user_id,
        cost_total: body.cost_total,
        currency: body.currency,
        notes: body.notes,
    };
    let license = licensing::create_license(&state.pool, &new).await?;
    Ok(Json(license))
}

/// `GET /licenses` — list licenses.
pub async fn list_licenses_handler(State(state): State<AppState>) -> AppResult<Json<Vec<License>>> {
    Ok(Json(licensing::list_licenses(&state.pool).await?))
}

/// `GET /jobs/check-expirations` — report licenses past their end date.
pub async fn check_expirations_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ExpirationReport>> {
    let today = Utc::now().date_naive();
    let expired_ids = licensing::list_expired_license_ids(&state.pool, today).await?;
    Ok(Json(ExpirationReport {
        expired_count: expired_ids.len(),
        expired_ids,
    }))
}
