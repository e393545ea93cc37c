//! # Admin Authentication Handler
//!
//! `POST /api/admin/login` checks the credentials against `ADMIN_EMAIL` and
//! the Argon2 hash in `ADMIN_PASSWORD_HASH`, then issues an HS256 JWT valid
//! for `JWT_EXPIRATION_HOURS`.
//!
//! Wrong email and wrong password get the same 401 so the response does not
//! reveal which one was wrong.

use axum::extract::{Json, State};
use lib_auth::{encode_jwt, verify_password};
use lib_core::dto::{LoginRequest, LoginResponse};
use lib_core::{AppError, Config};
use tracing::{debug, error, info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Email hoặc mật khẩu không đúng";

#[instrument(skip(config, req), fields(email = %req.email))]
pub async fn login(
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    info!("[LOGIN] Admin login attempt");

    if !req.email.trim().eq_ignore_ascii_case(&config.admin_email) {
        warn!("[LOGIN] Unknown email");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    debug!("[LOGIN] Verifying password...");
    let valid = verify_password(&req.password, &config.admin_password_hash).map_err(|e| {
        error!("[LOGIN] Configured password hash is unusable: {}", e);
        AppError::Config(e.to_string())
    })?;

    if !valid {
        warn!("[LOGIN] Wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = encode_jwt(&config.admin_email, &config.jwt_secret, config.jwt_expiration_hours)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("[LOGIN] Admin logged in");
    Ok(Json(LoginResponse { token }))
}
