//! Login flow: directory verification → identity reconciliation → token
//! issuance.

use sqlx::PgPool;
use tracing::{debug, info, warn};

use licensehub_core::auth::{jwt, queries};
use licensehub_core::directory::{DirectoryClient, DirectoryError};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::models::TokenResponse;

/// Authenticate against the directory and issue a bearer token.
///
/// Every directory-side failure — bad bind, missing entry, unreachable
/// server, broken service account — collapses to the same 401 so
/// unauthenticated callers learn nothing about directory state; only a
/// persistence failure during reconciliation surfaces as a server error.
/// Infrastructure faults are logged at warn, caller mistakes at debug.
pub async fn login(
    pool: &PgPool,
    directory: &DirectoryClient,
    auth: &AuthConfig,
    username: &str,
    password: &str,
) -> AppResult<TokenResponse> {
    let profile = match directory.authenticate(username, password).await {
        Ok(profile) => profile,
        Err(
            e @ (DirectoryError::Unavailable(_)
            | DirectoryError::Task(_)
            | DirectoryError::ServiceAccountRejected),
        ) => {
            warn!(error = %e, "directory failure during login");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
        Err(e) => {
            debug!(error = %e, "directory rejected login");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    // Without the canonical account name the local identity cannot be keyed
    // safely, so an entry that lacks it is rejected like a failed lookup.
    let Some(subject) = profile.account_name.clone() else {
        debug!("directory entry has no canonical account name");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    let user = queries::reconcile_login(pool, &subject, &profile).await?;

    let token = jwt::issue_access_token(
        &user.sam_account_name,
        auth.jwt_secret.as_bytes(),
        auth.jwt_algorithm,
        auth.jwt_expire_minutes,
    )?;

    info!(subject = %user.sam_account_name, "login succeeded");
    Ok(TokenResponse::bearer(token))
}
