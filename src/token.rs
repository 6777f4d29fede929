//! Stateless session credentials (JWT)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::store::UserId;

/// Session lifetime; the legacy tokens never expired
pub const SESSION_TTL_DAYS: i64 = 7;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub id: u64,
    /// Display name, snapshotted at login
    pub name: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Mints and verifies signed session credentials over a shared secret.
///
/// Tokens are stateless: they are never stored server-side and cannot be
/// revoked before their expiry claim lapses.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a session token binding the user's id and display name
    pub fn issue(&self, user_id: UserId, name: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            id: user_id.0,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify signature and expiry, yielding the embedded identity claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = SessionIssuer::new("test-secret");
        let token = issuer.issue(UserId(42), "Alice").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.name, "Alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = SessionIssuer::new("test-secret");
        let other = SessionIssuer::new("another-secret");
        let token = issuer.issue(UserId(1), "Bob").unwrap();

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = SessionIssuer::new("test-secret");
        assert!(issuer.verify("not.a.token").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = SessionIssuer::new("test-secret");
        let now = Utc::now();
        let claims = SessionClaims {
            id: 1,
            name: "Old".to_string(),
            iat: (now - Duration::days(10)).timestamp(),
            exp: (now - Duration::days(3)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(issuer.verify(&token).is_err());
    }
}
