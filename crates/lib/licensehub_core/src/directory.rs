//! Directory client adapter.
//!
//! Verifies credentials with a bind against an LDAP-compatible directory
//! (Active Directory style) and fetches the account's profile attributes,
//! either through a service-account connection or the user's own bind.

use std::collections::HashMap;
use std::time::Duration;

use ldap3::{LdapConn, LdapConnSettings, LdapError, Scope, SearchEntry, SearchOptions, ldap_escape};
use thiserror::Error;
use tracing::debug;

use crate::models::auth::DirectoryProfile;

/// Attributes requested for the account entry.
const PROFILE_ATTRIBUTES: [&str; 4] = ["displayName", "mail", "department", "sAMAccountName"];

/// LDAP result code for invalidCredentials.
const RC_INVALID_CREDENTIALS: u32 = 49;

/// Connection parameters for the directory server.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Server URI, e.g. `ldaps://ad.example.com:636`.
    pub server_uri: String,
    /// Search base, e.g. `DC=example,DC=com`.
    pub base_dn: String,
    /// Bind DN template; `{username}` is replaced with the submitted username.
    pub user_dn_format: String,
    /// Upgrade `ldap://` connections with STARTTLS. `ldaps://` URIs are
    /// always TLS regardless of this flag.
    pub use_tls: bool,
    /// Service account for attribute search, so end users don't need
    /// directory read rights. Both fields or neither.
    pub service_account_dn: Option<String>,
    pub service_account_password: Option<String>,
    /// Connect timeout; exceeding it surfaces as `Unavailable`.
    pub timeout: Duration,
}

/// Directory lookup failures.
///
/// The API layer folds all of these into a uniform "invalid credentials"
/// rejection; the distinction exists for server-side logging only.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory rejected bind credentials")]
    BindRejected,

    /// The service account itself failed to bind. The end user's own bind
    /// already succeeded at this point, so this is an infrastructure fault
    /// (rotated or broken service-account password), not a caller error.
    #[error("directory rejected the service account bind")]
    ServiceAccountRejected,

    #[error("no directory entry matched the account")]
    AccountNotFound,

    #[error("directory unavailable: {0}")]
    Unavailable(LdapError),

    #[error("directory task failed: {0}")]
    Task(String),
}

/// Client for credential verification and profile lookup.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    config: DirectoryConfig,
}

impl DirectoryClient {
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    /// Bind as the submitted credentials, then fetch the account's profile
    /// attributes.
    ///
    /// The ldap3 sync client blocks on network I/O, so the whole exchange
    /// runs on the blocking thread pool; the caller's task suspends until it
    /// completes.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<DirectoryProfile, DirectoryError> {
        let config = self.config.clone();
        let username = username.to_string();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || bind_and_search(&config, &username, &password))
            .await
            .map_err(|e| DirectoryError::Task(e.to_string()))?
    }
}

fn conn_settings(config: &DirectoryConfig) -> LdapConnSettings {
    LdapConnSettings::new()
        .set_conn_timeout(config.timeout)
        .set_starttls(config.use_tls && config.server_uri.starts_with("ldap://"))
}

fn open(config: &DirectoryConfig) -> Result<LdapConn, DirectoryError> {
    LdapConn::with_settings(conn_settings(config), &config.server_uri)
        .map_err(DirectoryError::Unavailable)
}

fn classify_bind(e: LdapError) -> DirectoryError {
    match &e {
        LdapError::LdapResult { result } if result.rc == RC_INVALID_CREDENTIALS => {
            DirectoryError::BindRejected
        }
        _ => DirectoryError::Unavailable(e),
    }
}

fn classify_service_bind(e: LdapError) -> DirectoryError {
    match &e {
        LdapError::LdapResult { result } if result.rc == RC_INVALID_CREDENTIALS => {
            DirectoryError::ServiceAccountRejected
        }
        _ => DirectoryError::Unavailable(e),
    }
}

fn bind_and_search(
    config: &DirectoryConfig,
    username: &str,
    password: &str,
) -> Result<DirectoryProfile, DirectoryError> {
    let mut user_conn = open(config)?;
    let user_dn = config.user_dn_format.replace("{username}", username);
    let result = user_conn
        .simple_bind(&user_dn, password)
        .map_err(DirectoryError::Unavailable)
        .and_then(|res| res.success().map_err(classify_bind))
        .and_then(|_| {
            match (&config.service_account_dn, &config.service_account_password) {
                (Some(dn), Some(pw)) => search_as_service_account(config, dn, pw, username),
                // Self lookup on the just-established user bind.
                _ => search_account(&mut user_conn, config, username),
            }
        });
    let _ = user_conn.unbind();
    result
}

fn search_as_service_account(
    config: &DirectoryConfig,
    service_dn: &str,
    service_password: &str,
    username: &str,
) -> Result<DirectoryProfile, DirectoryError> {
    let mut svc_conn = open(config)?;
    let result = svc_conn
        .simple_bind(service_dn, service_password)
        .map_err(DirectoryError::Unavailable)
        .and_then(|res| res.success().map_err(classify_service_bind))
        .and_then(|_| search_account(&mut svc_conn, config, username));
    let _ = svc_conn.unbind();
    result
}

fn search_account(
    conn: &mut LdapConn,
    config: &DirectoryConfig,
    username: &str,
) -> Result<DirectoryProfile, DirectoryError> {
    let filter = account_filter(username);
    debug!(filter = %filter, base_dn = %config.base_dn, "searching directory for account");
    let (entries, _res) = conn
        .with_search_options(SearchOptions::new().sizelimit(1))
        .search(
            &config.base_dn,
            Scope::Subtree,
            &filter,
            PROFILE_ATTRIBUTES.to_vec(),
        )
        .map_err(DirectoryError::Unavailable)?
        .success()
        .map_err(DirectoryError::Unavailable)?;
    let entry = entries
        .into_iter()
        .next()
        .ok_or(DirectoryError::AccountNotFound)?;
    Ok(profile_from_attrs(&SearchEntry::construct(entry).attrs))
}

/// Search filter matching the canonical account-name attribute against the
/// local part of the submitted username, with LDAP metacharacters escaped.
fn account_filter(username: &str) -> String {
    format!(
        "(sAMAccountName={})",
        ldap_escape(local_account_name(username))
    )
}

/// Strip a `DOMAIN\` prefix or `@domain` suffix from the username.
fn local_account_name(username: &str) -> &str {
    let name = username.rsplit('\\').next().unwrap_or(username);
    name.split('@').next().unwrap_or(name)
}

/// Decode a profile from the entry's attribute map. Each attribute is
/// independently optional; a missing or empty attribute becomes `None`.
fn profile_from_attrs(attrs: &HashMap<String, Vec<String>>) -> DirectoryProfile {
    DirectoryProfile {
        account_name: first_attr(attrs, "sAMAccountName"),
        display_name: first_attr(attrs, "displayName"),
        email: first_attr(attrs, "mail"),
        department: first_attr(attrs, "department"),
    }
}

fn first_attr(attrs: &HashMap<String, Vec<String>>, name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .filter(|value| !value.is_empty())
        .cloned()
}
