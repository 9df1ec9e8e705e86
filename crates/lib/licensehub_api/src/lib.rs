//! # licensehub_api
//!
//! HTTP API library for LicenseHub.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use licensehub_core::directory::DirectoryClient;

use crate::config::ApiConfig;
use crate::handlers::{assignments, auth, catalog, health, licenses, memos, purchase_orders};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration, built once at startup.
    pub config: ApiConfig,
    /// Directory client for credential verification.
    pub directory: DirectoryClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let directory = DirectoryClient::new(config.directory.clone());
        Self {
            pool,
            config,
            directory,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `licensehub_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    licensehub_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
///
/// Creates and `/auth/me` authenticate via the [`extract::AuthenticatedUser`]
/// extractor; lists and `/healthz` are public.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/vendors",
            get(catalog::list_vendors_handler).post(catalog::create_vendor_handler),
        )
        .route(
            "/products",
            get(catalog::list_products_handler).post(catalog::create_product_handler),
        )
        .route(
            "/licenses",
            get(licenses::list_licenses_handler).post(licenses::create_license_handler),
        )
        .route(
            "/jobs/check-expirations",
            get(licenses::check_expirations_handler),
        )
        .route(
            "/assignments",
            get(assignments::list_assignments_handler)
                .post(assignments::create_assignment_handler),
        )
        .route(
            "/assignments/{assignment_id}/return",
            post(assignments::return_assignment_handler),
        )
        .route(
            "/purchase-orders",
            get(purchase_orders::list_purchase_orders_handler)
                .post(purchase_orders::create_purchase_order_handler),
        )
        .route(
            "/memos",
            get(memos::list_memos_handler).post(memos::create_memo_handler),
        )
        .layer(cors)
        .with_state(state)
}
