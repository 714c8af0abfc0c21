//! Token issuance and verification.
//!
//! Access and refresh tokens are stateless signed JWTs (HS256, shared
//! secret). Nothing is persisted server-side: a token is valid until its
//! expiry claim passes or the client discards it. Refresh tokens carry a
//! type marker so they cannot be used as access tokens and vice versa.
//!
//! Issuance and verification are pure functions of (user id, clock, secret,
//! configured lifetime); the `_at` variants take an explicit clock so expiry
//! boundaries can be tested deterministically.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker distinguishing access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential attached to every authenticated request.
    Access,
    /// Longer-lived credential used solely to mint a new access token.
    Refresh,
}

/// Signed claim bundle carried inside a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,
    /// Expiry timestamp (Unix seconds).
    pub exp: i64,
    /// Token type marker.
    pub typ: TokenType,
}

/// Token errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The token's expiry claim has passed.
    #[error("token expired")]
    Expired,

    /// The signature does not match or the payload cannot be parsed.
    #[error("malformed token")]
    Malformed,

    /// Structurally valid token of the wrong type (e.g. an access token
    /// presented to the refresh flow).
    #[error("wrong token type")]
    WrongType,

    /// Token encoding failed.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies signed tokens for user sessions.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret and configured
    /// lifetimes.
    pub fn new(secret: &str, access_expiry_secs: i64, refresh_expiry_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_expiry_secs),
            refresh_ttl: Duration::days(refresh_expiry_days),
        }
    }

    /// Issue an access token for a user.
    pub fn issue_access(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_access_at(user_id, Utc::now())
    }

    /// Issue an access token with an explicit clock.
    pub fn issue_access_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue(user_id, now, self.access_ttl, TokenType::Access)
    }

    /// Issue a refresh token for a user.
    pub fn issue_refresh(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_refresh_at(user_id, Utc::now())
    }

    /// Issue a refresh token with an explicit clock.
    pub fn issue_refresh_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue(user_id, now, self.refresh_ttl, TokenType::Refresh)
    }

    fn issue(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        ttl: Duration,
        typ: TokenType,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            typ,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token's signature, expiry, and type marker.
    ///
    /// Returns the claims on success. Does not consult any store; identity
    /// resolution is a separate step.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        self.verify_at(token, expected, Utc::now())
    }

    /// Verify with an explicit clock.
    ///
    /// A token presented at exactly its expiry instant is rejected; one
    /// second earlier it is accepted.
    pub fn verify_at(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        // Expiry is checked against the injected clock below, not by the
        // jsonwebtoken validator.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Malformed)?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        if data.claims.typ != expected {
            return Err(TokenError::WrongType);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new("test-secret", 86_400, 7)
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = service();
        let token = tokens.issue_access("user-001").unwrap();

        let claims = tokens.verify(&token, TokenType::Access).unwrap();
        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.typ, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let tokens = service();
        let token = tokens.issue_refresh("user-001").unwrap();

        let claims = tokens.verify(&token, TokenType::Refresh).unwrap();
        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.typ, TokenType::Refresh);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let tokens = service();
        let token = tokens.issue_access("user-001").unwrap();

        let result = tokens.verify(&token, TokenType::Refresh);
        assert!(matches!(result, Err(TokenError::WrongType)));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let tokens = service();
        let token = tokens.issue_refresh("user-001").unwrap();

        let result = tokens.verify(&token, TokenType::Access);
        assert!(matches!(result, Err(TokenError::WrongType)));
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service();
        let issued_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let token = tokens.issue_access_at("user-001", issued_at).unwrap();

        let expiry = issued_at + Duration::seconds(86_400);

        // One instant before expiry: valid
        let just_before = expiry - Duration::seconds(1);
        assert!(tokens
            .verify_at(&token, TokenType::Access, just_before)
            .is_ok());

        // At exactly the expiry instant: rejected
        let result = tokens.verify_at(&token, TokenType::Access, expiry);
        assert!(matches!(result, Err(TokenError::Expired)));

        // After expiry: rejected
        let result = tokens.verify_at(&token, TokenType::Access, expiry + Duration::hours(1));
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let tokens = service();
        let other = TokenService::new("other-secret", 86_400, 7);

        let token = tokens.issue_access("user-001").unwrap();
        let result = other.verify(&token, TokenType::Access);
        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let tokens = service();
        let result = tokens.verify("not-a-jwt", TokenType::Access);
        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[test]
    fn test_expiry_checked_before_type() {
        // An expired refresh token presented as an access token reports
        // Expired, not WrongType: expiry is the first deterministic check.
        let tokens = service();
        let issued_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let token = tokens.issue_refresh_at("user-001", issued_at).unwrap();

        let result = tokens.verify(&token, TokenType::Access);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_claims_serialize_type_marker() {
        let claims = Claims {
            sub: "user-001".to_string(),
            iat: 0,
            exp: 100,
            typ: TokenType::Refresh,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["typ"], "refresh");
    }
}
