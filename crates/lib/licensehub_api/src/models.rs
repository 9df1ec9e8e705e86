//! Request and response bodies.
//!
//! Row types from `licensehub_core::models` serialize directly as list/create
//! responses; the types here are the request DTOs plus the handful of
//! responses that are not plain rows.

use chrono::{DateTime, NaiveDate, Utc};
use licensehub_core::models::auth::User;
use serde::{Deserialize, Serialize};

/// JSON error body produced by `AppError`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /auth/login` request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// `GET /auth/me` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub sam_account_name: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub is_admin: bool,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            sam_account_name: user.sam_account_name,
            display_name: user.display_name,
            email: user.email,
            department: user.department,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VendorCreate {
    pub name: String,
    pub homepage: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: Option<String>,
    pub vendor_id: Option<i64>,
    pub notes: Option<String>,
}

fn default_license_type() -> String {
    "per_seat".to_string()
}

fn default_seat_count() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct LicenseCreate {
    pub product_id: i64,
    pub license_key: Option<String>,
    /// Parsed against `LicenseType`; unknown values are a 400, not a 422.
    #[serde(default = "default_license_type")]
    pub license_type: String,
    #[serde(default = "default_seat_count")]
    pub seat_count: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub maintenance_end_date: Option<NaiveDate>,
    pub purchase_order_id: Option<i64>,
    pub owner_user_id: Option<i64>,
    pub cost_total: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

/// `GET /jobs/check-expirations` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpirationReport {
    pub expired_count: usize,
    pub expired_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentCreate {
    pub license_id: i64,
    pub assigned_to_user_id: i64,
    pub assigned_machine: Option<String>,
    pub due_back_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseOrderCreate {
    pub number: String,
    pub vendor_id: Option<i64>,
    pub purchaser_user_id: Option<i64>,
    pub requestor_user_id: Option<i64>,
    pub requested_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub received_at: Option<DateTime<Utc>>,
    pub total_cost: Option<f64>,
    pub currency: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemoCreate {
    pub related_type: String,
    pub related_id: i64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_create_defaults_apply() {
        let body: LicenseCreate = serde_json::from_str(r#"{"product_id": 7}"#).unwrap();
        assert_eq!(body.license_type, "per_seat");
        assert_eq!(body.seat_count, 1);
        assert_eq!(body.license_key, None);
    }

    #[test]
    fn token_response_is_bearer() {
        let resp = TokenResponse::bearer("abc".into());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
