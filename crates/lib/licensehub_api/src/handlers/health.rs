//! Liveness endpoint.

use axum::Json;

/// `GET /healthz` — always OK while the process serves requests; does not
/// touch the store or the directory.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
