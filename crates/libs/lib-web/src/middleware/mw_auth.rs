//! # Admin Authentication Middleware
//!
//! Validates the `Authorization: Bearer <token>` header on `/api/admin/*`
//! routes and injects the token's [`Claims`] into request extensions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::require_admin;
//!
//! let admin = Router::new()
//!     .route("/api/admin/sliders", get(list_sliders))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```
//!
//! Handlers can then extract claims using `Extension<Claims>`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::{decode_jwt, Claims};
use lib_core::{AppError, Config};
use tracing::{debug, warn};

const UNAUTHORIZED_MESSAGE: &str = "Vui lòng đăng nhập với quyền quản trị";

/// Reject requests without a valid admin token.
///
/// - **Valid admin token**: continues with `Claims` in extensions
/// - **Missing/invalid/expired token or non-admin role**: `401 Unauthorized`
pub async fn require_admin(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authorize(&req, &config)?;
    debug!("[AUTH] Authenticated admin: {}", claims.sub);

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn authorize(req: &Request, config: &Config) -> Result<Claims, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Invalid Authorization header format");
        AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    })?;

    let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    })?;

    if !claims.is_admin() {
        warn!("[AUTH] Token without admin role for {}", claims.sub);
        return Err(AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()));
    }

    Ok(claims)
}
