//! # Media Types

use serde::{Deserialize, Serialize};

/// Successful upload as reported by Cloudinary (subset of its response).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudinaryUploadResponse {
    pub public_id: String,
    pub secure_url: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub created_at: String,
}

/// A file to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Delivery transformations for [`crate::url::optimized_url`].
///
/// `quality` and `format` default to `auto` when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<String>,
    pub format: Option<String>,
}

impl TransformOptions {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Error envelope Cloudinary returns on failure: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudinaryErrorBody {
    pub error: CloudinaryErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudinaryErrorDetail {
    pub message: String,
}
