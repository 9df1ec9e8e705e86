//! License, assignment, purchase order, and memo queries.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::models::licensing::{Assignment, License, LicenseType, Memo, PurchaseOrder};

const LICENSE_COLUMNS: &str = "id, product_id, license_key, license_type, seat_count, \
     start_date, end_date, maintenance_end_date, purchase_order_id, owner_user_id, \
     cost_total, currency, notes, created_at, updated_at";

const ASSIGNMENT_COLUMNS: &str = "id, license_id, assigned_to_user_id, assigned_machine, \
     assigned_at, due_back_at, status, created_at, updated_at";

const PURCHASE_ORDER_COLUMNS: &str = "id, number, vendor_id, purchaser_user_id, \
     requestor_user_id, requested_at, approved_at, received_at, total_cost, currency, memo, \
     created_at, updated_at";

const MEMO_COLUMNS: &str =
    "id, author_user_id, related_type, related_id, content, created_at, updated_at";

/// Parameters for creating a license.
#[derive(Debug, Clone)]
pub struct NewLicense {
    pub product_id: i64,
    pub license_key: Option<String>,
    pub license_type: LicenseType,
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

pub async fn create_license(pool: &PgPool, new: &NewLicense) -> Result<License, sqlx::Error> {
    sqlx::query_as::<_, License>(&format!(
        "INSERT INTO licenses (product_id, license_key, license_type, seat_count, \
             start_date, end_date, maintenance_end_date, purchase_order_id, owner_user_id, \
             cost_total, currency, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {LICENSE_COLUMNS}"
    ))
    .bind(new.product_id)
    .bind(new.license_key.as_deref())
    .bind(new.license_type)
    .bind(new.seat_count)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(new.maintenance_end_date)
    .bind(new.purchase_order_id)
    .bind(new.owner_user_id)
    .bind(new.cost_total)
    .bind(new.currency.as_deref())
    .bind(new.notes.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn list_licenses(pool: &PgPool) -> Result<Vec<License>, sqlx::Error> {
    sqlx::query_as::<_, License>(&format!("SELECT {LICENSE_COLUMNS} FROM licenses"))
        .fetch_all(pool)
        .await
}

/// IDs of licenses whose validity window ended before `today`.
pub async fn list_expired_license_ids(
    pool: &PgPool,
    today: NaiveDate,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT id FROM licenses WHERE end_date IS NOT NULL AND end_date < $1 ORDER BY id",
    )
    .bind(today)
    .fetch_all(pool)
    .await
}

/// Parameters for creating an assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub license_id: i64,
    pub assigned_to_user_id: i64,
    pub assigned_machine: Option<String>,
    pub due_back_at: Option<DateTime<Utc>>,
}

pub async fn create_assignment(
    pool: &PgPool,
    new: &NewAssignment,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (license_id, assigned_to_user_id, assigned_machine, \
             due_back_at, status) \
         VALUES ($1, $2, $3, $4, 'assigned') \
         RETURNING {ASSIGNMENT_COLUMNS}"
    ))
    .bind(new.license_id)
    .bind(new.assigned_to_user_id)
    .bind(new.assigned_machine.as_deref())
    .bind(new.due_back_at)
    .fetch_one(pool)
    .await
}

pub async fn list_assignments(pool: &PgPool) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments"))
        .fetch_all(pool)
        .await
}

/// Mark an assignment returned. `None` when no such assignment exists.
pub async fn return_assignment(
    pool: &PgPool,
    assignment_id: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "UPDATE assignments SET status = 'returned', updated_at = now() \
         WHERE id = $1 \
         RETURNING {ASSIGNMENT_COLUMNS}"
    ))
    .bind(assignment_id)
    .fetch_optional(pool)
    .await
}

/// Parameters for creating a purchase order.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrder {
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

pub async fn create_purchase_order(
    pool: &PgPool,
    new: &NewPurchaseOrder,
) -> Result<PurchaseOrder, sqlx::Error> {
    sqlx::query_as::<_, PurchaseOrder>(&format!(
        "INSERT INTO purchase_orders (number, vendor_id, purchaser_user_id, \
             requestor_user_id, requested_at, approved_at, received_at, total_cost, \
             currency, memo) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {PURCHASE_ORDER_COLUMNS}"
    ))
    .bind(&new.number)
    .bind(new.vendor_id)
    .bind(new.purchaser_user_id)
    .bind(new.requestor_user_id)
    .bind(new.requested_at)
    .bind(new.approved_at)
    .bind(new.received_at)
    .bind(new.total_cost)
    .bind(new.currency.as_deref())
    .bind(new.memo.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn list_purchase_orders(pool: &PgPool) -> Result<Vec<PurchaseOrder>, sqlx::Error> {
    sqlx::query_as::<_, PurchaseOrder>(&format!(
        "SELECT {PURCHASE_ORDER_COLUMNS} FROM purchase_orders ORDER BY id DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn create_memo(
    pool: &PgPool,
    author_user_id: i64,
    related_type: &str,
    related_id: i64,
    content: &str,
) -> Result<Memo, sqlx::Error> {
    sqlx::query_as::<_, Memo>(&format!(
        "INSERT INTO memos (author_user_id, related_type, related_id, content) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {MEMO_COLUMNS}"
    ))
    .bind(author_user_id)
    .bind(related_type)
    .bind(related_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn list_memos(pool: &PgPool) -> Result<Vec<Memo>, sqlx::Error> {
    sqlx::query_as::<_, Memo>(&format!(
        "SELECT {MEMO_COLUMNS} FROM memos ORDER BY id DESC"
    ))
    .fetch_all(pool)
    .await
}
