//! License, assignment, purchase order, and memo models.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Licensing model of a purchased entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "license_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    PerSeat,
    Floating,
    Subscription,
    Network,
    Concurrent,
}

impl FromStr for LicenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_seat" => Ok(Self::PerSeat),
            "floating" => Ok(Self::Floating),
            "subscription" => Ok(Self::Subscription),
            "network" => Ok(Self::Network),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(format!("unknown license_type '{other}'")),
        }
    }
}

/// License row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct License {
    pub id: i64,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a seat assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Returned,
    Expired,
}

/// Assignment of a license seat to a user (and optionally a machine).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: i64,
    pub license_id: i64,
    pub assigned_to_user_id: i64,
    pub assigned_machine: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub due_back_at: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Purchase order row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseOrder {
    pub id: i64,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-form note attached to another record (license, product, ...).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Memo {
    pub id: i64,
    pub author_user_id: i64,
    pub related_type: String,
    pub related_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_type_parses_known_values() {
        assert_eq!("per_seat".parse::<LicenseType>(), Ok(LicenseType::PerSeat));
        assert_eq!(
            "concurrent".parse::<LicenseType>(),
            Ok(LicenseType::Concurrent)
        );
    }

    #[test]
    fn license_type_rejects_unknown_values() {
        assert!("site_wide".parse::<LicenseType>().is_err());
        assert!("PER_SEAT".parse::<LicenseType>().is_err());
    }

    #[test]
    fn assignment_status_serializes_snake_case() {
        let json = serde_json::to_string(&AssignmentStatus::Assigned).unwrap();
        assert_eq!(json, "\"assigned\"");
    }
}
