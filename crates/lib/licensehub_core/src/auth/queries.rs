//! Identity reconciliation queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{DirectoryProfile, User};

const USER_COLUMNS: &str = "id, sam_account_name, display_name, email, department, is_admin, \
     created_at, updated_at";

/// Exact-match lookup by `sam_account_name`; used on every authenticated
/// request.
pub async fn find_user_by_subject(
    pool: &PgPool,
    subject: &str,
) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE sam_account_name = $1"
    ))
    .bind(subject)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upsert the local user for a verified directory identity.
///
/// Creates the row on first login; on every later login overwrites
/// display_name/email/department with the latest directory values
/// (last-login-wins). `is_admin` and `id` are never touched here. The
/// ON CONFLICT arm also resolves the race where two concurrent first logins
/// insert the same subject: the loser lands on the update path instead of
/// failing on the unique constraint.
pub async fn reconcile_login(
    pool: &PgPool,
    subject: &str,
    profile: &DirectoryProfile,
) -> Result<User, AuthError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (sam_account_name, display_name, email, department, is_admin) \
         VALUES ($1, $2, $3, $4, FALSE) \
         ON CONFLICT (sam_account_name) DO UPDATE \
         SET display_name = EXCLUDED.display_name, \
             email = EXCLUDED.email, \
             department = EXCLUDED.department, \
             updated_at = now() \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(subject)
    .bind(profile.display_name.as_deref())
    .bind(profile.email.as_deref())
    .bind(profile.department.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(user)
}
