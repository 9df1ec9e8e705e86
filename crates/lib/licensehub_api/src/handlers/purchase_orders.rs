//! Purchase order handlers.

use axum::Json;
use axum::extract::State;

use licensehub_core::licensing::{self, NewPurchaseOrder};
use licensehub_core::models::licensing::PurchaseOrder;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AuthenticatedUser;
use crate::models::PurchaseOrderCreate;

/// `POST /purchase-orders` — record a purchase order. Requires authentication.
pub async fn create_purchase_order_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<PurchaseOrderCreate>,
) -> AppResult<Json<PurchaseOrder>> {
    let new = NewPurchaseOrder {
        number: body.number,
        vendor_id: body.vendor_id,
        purchaser_user_id: body.purchaser_user_id,
        requestor_user_id: body.requestor_user_id,
        requested_at: body.requested_at,
        approved_at: body.approved_at,
        received_at: body.received_at,
        total_cost: body.total_cost,
        currency: body.currency,
        memo: body.memo,
    };
    let po = licensing::create_purchase_order(&state.pool, &new).await?;
    Ok(Json(po))
}

/// `GET /purchase-orders` — list purchase orders, newest first.
pub async fn list_purchase_orders_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    Ok(Json(licensing::list_purchase_orders(&state.pool).await?))
}
