//! # Middleware
//!
//! Axum middleware for admin authentication, request stamping, and logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Admin JWT authentication
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Request/response logging with header redaction

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::require_admin;
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
