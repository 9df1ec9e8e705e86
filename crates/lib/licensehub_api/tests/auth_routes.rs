//! Router-level tests — build the real router and drive it with oneshot
//! requests. No live PostgreSQL or directory is needed: every request here
//! is answered (or rejected) before the store would be touched, and the
//! login test points at a directory URI nothing listens on.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::Algorithm;
use tower::ServiceExt;

use licensehub_api::AppState;
use licensehub_api::config::{ApiConfig, AuthConfig};
use licensehub_api::models::ErrorResponse;
use licensehub_core::directory::DirectoryConfig;

const DB_URL: &str = "postgres://localhost:5432/licensehub_test";

fn test_state() -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy(DB_URL)
        .expect("lazy pool");
    let config = ApiConfig {
        site_name: "LicenseHub".into(),
        database_url: DB_URL.into(),
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_algorithm: Algorithm::HS256,
            jwt_expire_minutes: 480,
        },
        directory: DirectoryConfig {
            // Port 1 on loopback: connection refused immediately.
            server_uri: "ldap://127.0.0.1:1".into(),
            base_dn: "DC=example,DC=com".into(),
            user_dn_format: "{username}".into(),
            use_tls: false,
            service_account_dn: None,
            service_account_password: None,
            timeout: Duration::from_secs(2),
        },
    };
    AppState::new(pool, config)
}

async fn error_body(resp: axum::response::Response) -> ErrorResponse {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse error body")
}

#[tokio::test]
async fn healthz_is_public_and_ok() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn me_without_header_is_unauthorized() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(resp).await;
    assert_eq!(body.error, "unauthorized");
}

#[tokio::test]
async fn me_with_non_bearer_scheme_is_unauthorized() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(resp).await;
    assert_eq!(body.message, "Invalid or expired token");
}

#[tokio::test]
async fn protected_create_without_auth_is_unauthorized() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/vendors")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Initech"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unreachable_directory_is_unauthorized() {
    let app = licensehub_api::router(test_state());

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username": "jdoe", "password": "secret"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Directory availability is indistinguishable from bad credentials.
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = error_body(resp).await;
    assert_eq!(body.message, "Invalid credentials");
}
