//! # JWT Token Management
//!
//! HS256 session tokens issued to the admin after login.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role claim carried by admin tokens.
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims for an authenticated admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin email)
    pub sub: String,
    /// Role, always [`ADMIN_ROLE`] for now
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode JWT: {0}")]
    Encode(String),

    #[error("Failed to decode JWT: {0}")]
    Decode(String),
}

/// Encode an admin JWT for `subject`, valid for `expiration_hours`.
pub fn encode_jwt(subject: &str, secret: &str, expiration_hours: i64) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: subject.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Decode and validate a JWT (signature and expiry).
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Decode(e.to_string()))
}
