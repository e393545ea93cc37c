//! # Utilities Library
//!
//! Shared helpers for environment variables, time, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::unix_timestamp;
pub use validation::{validate_not_empty, validate_email, validate_non_negative};
