//! # Admin Authentication DTOs
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/admin/login` - [`LoginRequest`] -> [`LoginResponse`]
//!
//! Every other `/api/admin/*` route expects the returned token in an
//! `Authorization: Bearer <token>` header.
//!
//! ```text
//! POST /api/admin/login
//! Content-Type: application/json
//!
//! { "email": "admin@thep.vn", "password": "..." }
//! ```
//!
//! Response:
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```

use serde::{Deserialize, Serialize};

/// Admin credentials.
///
/// The password travels in plaintext over HTTPS and is only ever compared
/// against the configured Argon2 hash. Never log it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued JWT for the admin session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Standard error body.
///
/// Handlers that don't go through [`AppError`](crate::error::AppError)
/// (the chat endpoint) reply with this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
