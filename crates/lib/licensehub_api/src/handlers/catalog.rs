//! Vendor and product catalog handlers.

use axum::Json;
use axum::extract::State;

use licensehub_core::catalog;
use licensehub_core::models::catalog::{Product, Vendor};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AuthenticatedUser;
use crate::models::{ProductCreate, VendorCreate};

/// `POST /vendors` — create a vendor. Requires authentication.
pub async fn create_vendor_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<VendorCreate>,
) -> AppResult<Json<Vendor>> {
    let vendor = catalog::create_vendor(
        &state.pool,
        &body.name,
        body.homepage.as_deref(),
        body.notes.as_deref(),
    )
    .await?;
    Ok(Json(vendor))
}

/// `GET /vendors` — list vendors by name.
pub async fn list_vendors_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Vendor>>> {
    Ok(Json(catalog::list_vendors(&state.pool).await?))
}

/// `POST /products` — create a product. Requires authentication.
pub async fn create_product_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = catalog::create_product(
        &state.pool,
        &body.name,
        body.category.as_deref(),
        body.vendor_id,
        body.notes.as_deref(),
    )
    .await?;
    Ok(Json(product))
}

/// `GET /products` — list products by name.
pub async fn list_products_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(catalog::list_products(&state.pool).await?))
}
