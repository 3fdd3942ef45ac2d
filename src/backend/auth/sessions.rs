/**
 * Token Service
 *
 * Issues and verifies the signed, time-limited bearer tokens that identify a
 * user on protected routes. Tokens are JWTs carrying only the user id
 * (`sub`) and an expiry (`exp`). The service is stateless: everything it
 * needs comes from the `TokenConfig` it is constructed with.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID, string encoded
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Reasons a token fails verification
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, algorithm or structure is wrong
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    /// `exp` is not in the future
    #[error("token expired")]
    Expired,
    /// `sub` is not a user id
    #[error("token subject is not a user id: {0}")]
    BadSubject(String),
}

/// Signing configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Lifetime of access tokens
    pub access_ttl: Duration,
    /// Lifetime of refresh tokens
    pub refresh_ttl: Duration,
}

/// Issues and verifies bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Create a token for `user_id` that expires `ttl` from now
    pub fn issue(&self, user_id: i64, ttl: Duration) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
    }

    /// Create a short-lived access token
    pub fn issue_access(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(user_id, self.access_ttl)
    }

    /// Create a long-lived refresh token
    pub fn issue_refresh(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(user_id, self.refresh_ttl)
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        // jsonwebtoken still accepts a token on its exact expiry second
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::BadSubject(claims.sub))
    }
}
