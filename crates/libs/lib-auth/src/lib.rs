//! # Authentication Library
//!
//! Admin password hashing/verification and JWT session tokens.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password, PwdError};
pub use token::{Claims, encode_jwt, decode_jwt, TokenError, ADMIN_ROLE};
