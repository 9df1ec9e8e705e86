//! API server configuration.
//!
//! All values are environment-sourced and parsed once at startup; missing
//! required values fail process startup rather than the first request.

use std::time::Duration;

use jsonwebtoken::Algorithm;
use licensehub_core::auth::jwt::DEFAULT_TOKEN_TTL_MINUTES;
use licensehub_core::directory::DirectoryConfig;
use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Token signing parameters.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing key shared with any out-of-process verifier.
    pub jwt_secret: String,
    /// HMAC family only (the key is symmetric).
    pub jwt_algorithm: Algorithm,
    pub jwt_expire_minutes: i64,
}

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Display name reported by the service.
    pub site_name: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    pub auth: AuthConfig,
    pub directory: DirectoryConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                      | Default         |
    /// |-------------------------------|-----------------|
    /// | `SITE_NAME`                   | `LicenseHub`    |
    /// | `DATABASE_URL`                | required        |
    /// | `JWT_SECRET`                  | required        |
    /// | `JWT_ALGORITHM`               | `HS256`         |
    /// | `JWT_EXPIRE_MINUTES`          | `480`           |
    /// | `AD_SERVER_URI`               | required        |
    /// | `AD_BASE_DN`                  | required        |
    /// | `AD_USER_DN_FORMAT`           | `{username}`    |
    /// | `AD_USE_TLS`                  | `true`          |
    /// | `AD_SERVICE_ACCOUNT_DN`       | unset           |
    /// | `AD_SERVICE_ACCOUNT_PASSWORD` | unset           |
    /// | `AD_TIMEOUT_SECS`             | `10`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            get(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let jwt_algorithm = match get("JWT_ALGORITHM") {
            None => Algorithm::HS256,
            Some(value) => parse_hmac_algorithm(&value)?,
        };

        let jwt_expire_minutes = match get("JWT_EXPIRE_MINUTES") {
            None => DEFAULT_TOKEN_TTL_MINUTES,
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_EXPIRE_MINUTES",
                reason: format!("'{value}' is not an integer"),
            })?,
        };

        let use_tls = match get("AD_USE_TLS") {
            None => true,
            Some(value) => parse_bool("AD_USE_TLS", &value)?,
        };

        let timeout_secs: u64 = match get("AD_TIMEOUT_SECS") {
            None => 10,
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "AD_TIMEOUT_SECS",
                reason: format!("'{value}' is not an integer"),
            })?,
        };

        let service_account_dn = get("AD_SERVICE_ACCOUNT_DN").filter(|v| !v.is_empty());
        let service_account_password =
            get("AD_SERVICE_ACCOUNT_PASSWORD").filter(|v| !v.is_empty());
        if service_account_dn.is_some() != service_account_password.is_some() {
            return Err(ConfigError::Invalid {
                name: "AD_SERVICE_ACCOUNT_DN",
                reason: "service account DN and password must be set together".to_string(),
            });
        }

        Ok(Self {
            site_name: get("SITE_NAME").unwrap_or_else(|| "LicenseHub".to_string()),
            database_url: required("DATABASE_URL")?,
            auth: AuthConfig {
                jwt_secret: required("JWT_SECRET")?,
                jwt_algorithm,
                jwt_expire_minutes,
            },
            directory: DirectoryConfig {
                server_uri: required("AD_SERVER_URI")?,
                base_dn: required("AD_BASE_DN")?,
                user_dn_format: get("AD_USER_DN_FORMAT")
                    .unwrap_or_else(|| "{username}".to_string()),
                use_tls,
                service_account_dn,
                service_account_password,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_hmac_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    match value.parse::<Algorithm>() {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        Ok(_) => Err(ConfigError::Invalid {
            name: "JWT_ALGORITHM",
            reason: format!("'{value}' is not a symmetric-key algorithm"),
        }),
        Err(_) => Err(ConfigError::Invalid {
            name: "JWT_ALGORITHM",
            reason: format!("unknown algorithm '{value}'"),
        }),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("'{value}' is not a boolean"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost:5432/licensehub"),
            ("JWT_SECRET", "test-secret"),
            ("AD_SERVER_URI", "ldaps://ad.example.com:636"),
            ("AD_BASE_DN", "DC=example,DC=com"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<ApiConfig, ConfigError> {
        ApiConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn minimal_env_applies_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.site_name, "LicenseHub");
        assert_eq!(config.auth.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.auth.jwt_expire_minutes, 480);
        assert_eq!(config.directory.user_dn_format, "{username}");
        assert!(config.directory.use_tls);
        assert_eq!(config.directory.timeout, Duration::from_secs(10));
        assert_eq!(config.directory.service_account_dn, None);
    }

    #[test]
    fn missing_required_value_fails() {
        for name in ["DATABASE_URL", "JWT_SECRET", "AD_SERVER_URI", "AD_BASE_DN"] {
            let mut env = base_env();
            env.remove(name);
            assert!(
                matches!(load(&env), Err(ConfigError::Missing(missing)) if missing == name),
                "expected missing {name}"
            );
        }
    }

    #[test]
    fn empty_required_value_counts_as_missing() {
        let mut env = base_env();
        env.insert("JWT_SECRET", "");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn hmac_algorithms_accepted() {
        let mut env = base_env();
        env.insert("JWT_ALGORITHM", "HS512");
        assert_eq!(load(&env).unwrap().auth.jwt_algorithm, Algorithm::HS512);
    }

    #[test]
    fn asymmetric_algorithm_rejected() {
        let mut env = base_env();
        env.insert("JWT_ALGORITHM", "RS256");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { name: "JWT_ALGORITHM", .. })
        ));
    }

    #[test]
    fn service_account_requires_both_dn_and_password() {
        let mut env = base_env();
        env.insert("AD_SERVICE_ACCOUNT_DN", "CN=svc,DC=example,DC=com");
        assert!(load(&env).is_err());

        env.insert("AD_SERVICE_ACCOUNT_PASSWORD", "svc-password");
        let config = load(&env).unwrap();
        assert_eq!(
            config.directory.service_account_dn.as_deref(),
            Some("CN=svc,DC=example,DC=com")
        );
    }

    #[test]
    fn tls_flag_parses() {
        let mut env = base_env();
        env.insert("AD_USE_TLS", "false");
        assert!(!load(&env).unwrap().directory.use_tls);

        env.insert("AD_USE_TLS", "sometimes");
        assert!(load(&env).is_err());
    }
}
