//! JWT access token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Default access token lifetime in minutes (one working day).
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 480;

/// Issue a signed access token for `subject`.
///
/// Claims are `{sub, exp = now + ttl, iat}`; the token is self-contained and
/// never recorded server-side, so it stays valid until expiry.
pub fn issue_access_token(
    subject: &str,
    secret: &[u8],
    algorithm: Algorithm,
    ttl_minutes: i64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: subject.to_string(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify an access token, returning the claims on success.
///
/// Malformed tokens, bad signatures, algorithm mismatches, expired tokens,
/// and tokens without a `sub` claim all collapse to `None` — callers must
/// not distinguish them to the client.
pub fn verify_access_token(token: &str, secret: &[u8], algorithm: Algorithm) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    // No clock skew allowance: expiry is a hard boundary.
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";

    fn encode_raw(claims: &serde_json::Value, algorithm: Algorithm) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_subject() {
        let token = issue_access_token("jdoe", SECRET, Algorithm::HS256, 60).unwrap();
        let claims = verify_access_token(&token, SECRET, Algorithm::HS256).unwrap();
        assert_eq!(claims.sub, "jdoe");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_access_token("jdoe", SECRET, Algorithm::HS256, 60).unwrap();
        assert!(verify_access_token(&token, b"other-secret", Algorithm::HS256).is_none());
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let token = issue_access_token("jdoe", SECRET, Algorithm::HS384, 60).unwrap();
        assert!(verify_access_token(&token, SECRET, Algorithm::HS256).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let token = encode_raw(
            &json!({"sub": "jdoe", "exp": now - 5, "iat": now - 65}),
            Algorithm::HS256,
        );
        assert!(verify_access_token(&token, SECRET, Algorithm::HS256).is_none());
    }

    #[test]
    fn token_inside_ttl_window_verifies() {
        let now = Utc::now().timestamp();
        let token = encode_raw(
            &json!({"sub": "jdoe", "exp": now + 60, "iat": now}),
            Algorithm::HS256,
        );
        let claims = verify_access_token(&token, SECRET, Algorithm::HS256).unwrap();
        assert_eq!(claims.sub, "jdoe");
    }

    #[test]
    fn missing_sub_claim_is_rejected() {
        let now = Utc::now().timestamp();
        let token = encode_raw(&json!({"exp": now + 60, "iat": now}), Algorithm::HS256);
        assert!(verify_access_token(&token, SECRET, Algorithm::HS256).is_none());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(verify_access_token("not-a-jwt", SECRET, Algorithm::HS256).is_none());
    }
}
