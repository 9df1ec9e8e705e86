//! Vendor and product catalog queries.

use sqlx::PgPool;

use crate::models::catalog::{Product, Vendor};

const VENDOR_COLUMNS: &str = "id, name, homepage, notes, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, category, notes, vendor_id, created_at, updated_at";

pub async fn create_vendor(
    pool: &PgPool,
    name: &str,
    homepage: Option<&str>,
    notes: Option<&str>,
) -> Result<Vendor, sqlx::Error> {
    sqlx::query_as::<_, Vendor>(&format!(
        "INSERT INTO vendors (name, homepage, notes) VALUES ($1, $2, $3) \
         RETURNING {VENDOR_COLUMNS}"
    ))
    .bind(name)
    .bind(homepage)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn list_vendors(pool: &PgPool) -> Result<Vec<Vendor>, sqlx::Error> {
    sqlx::query_as::<_, Vendor>(&format!(
        "SELECT {VENDOR_COLUMNS} FROM vendors ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn create_product(
    pool: &PgPool,
    name: &str,
    category: Option<&str>,
    vendor_id: Option<i64>,
    notes: Option<&str>,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, category, vendor_id, notes) VALUES ($1, $2, $3, $4) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(name)
    .bind(category)
    .bind(vendor_id)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}
