//! Authentication logic.
//!
//! Provides JWT issuance/verification and the identity reconciliation
//! queries shared by the API layer.

pub mod jwt;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
