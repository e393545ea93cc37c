//! # Media Errors

use thiserror::Error;

/// Message shown to users for any upload failure without a usable detail.
pub const UPLOAD_FAILED_MESSAGE: &str = "Không thể tải ảnh lên. Vui lòng thử lại sau.";

#[derive(Debug, Error)]
pub enum MediaError {
    /// Client setup or bad local input (e.g. an invalid MIME type).
    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    /// Cloudinary answered with a non-success status.
    #[error("Cloudinary rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network failure or unreadable response.
    #[error("Upload transport error: {0}")]
    Transport(String),
}

impl MediaError {
    /// Message safe to return to the caller.
    ///
    /// Rejections surface Cloudinary's own detail; everything else is generic.
    pub fn user_message(&self) -> String {
        match self {
            MediaError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        MediaError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_surfaces_detail() {
        let err = MediaError::Rejected { status: 401, message: "Invalid Signature".into() };
        assert_eq!(err.user_message(), "Invalid Signature");
    }

    #[test]
    fn test_transport_is_generic() {
        let err = MediaError::Transport("connection reset".into());
        assert_eq!(err.user_message(), UPLOAD_FAILED_MESSAGE);

        let blank = MediaError::Rejected { status: 500, message: " ".into() };
        assert_eq!(blank.user_message(), UPLOAD_FAILED_MESSAGE);
    }
}
