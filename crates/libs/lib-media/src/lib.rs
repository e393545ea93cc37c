//! # Media Library
//!
//! Cloudinary integration: request signing, signed uploads, and delivery URLs.

pub mod client;
pub mod error;
pub mod signature;
pub mod types;
pub mod url;

// Re-export commonly used types from root for convenience
pub use client::{CloudinaryClient, CloudinaryConfig};
pub use error::MediaError;
pub use signature::{sha1_hex, sign_params, string_to_sign};
pub use types::{CloudinaryUploadResponse, TransformOptions, UploadFile};
