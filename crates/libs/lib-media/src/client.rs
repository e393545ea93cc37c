//! # Cloudinary Client
//!
//! Signed uploads straight to the Cloudinary upload API.
//!
//! ```text
//! UploadFile + folder → {folder, timestamp} → sign_params(.., api_secret)
//!     → multipart {file, folder, timestamp, api_key, signature}
//!     → POST {api_base}/{cloud_name}/image/upload
//! ```
//!
//! Calls are single-shot: no retry, no backoff. A non-2xx answer becomes
//! [`MediaError::Rejected`] carrying Cloudinary's own message.

use crate::error::MediaError;
use crate::signature::sign_params;
use crate::types::{CloudinaryErrorBody, CloudinaryUploadResponse, TransformOptions, UploadFile};
use crate::url;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Account settings for the Cloudinary client.
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder used when the caller does not pick one
    pub default_folder: String,
    /// Upload API root, overridable for tests
    pub api_base: String,
    /// Delivery CDN root
    pub delivery_base: String,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: &str, api_key: &str, api_secret: &str, default_folder: &str) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            default_folder: default_folder.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            delivery_base: url::DEFAULT_DELIVERY_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Form fields that accompany the file in a signed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUpload {
    pub folder: String,
    pub timestamp: i64,
    pub api_key: String,
    pub signature: String,
}

pub struct CloudinaryClient {
    http: Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let http = Client::builder()
            .build()
            .map_err(|e| MediaError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    /// Sign `{folder, timestamp}` for an upload.
    pub fn sign_upload(&self, folder: &str, timestamp: i64) -> SignedUpload {
        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        params.insert("timestamp", timestamp.to_string());

        SignedUpload {
            folder: folder.to_string(),
            timestamp,
            api_key: self.config.api_key.clone(),
            signature: sign_params(&params, &self.config.api_secret),
        }
    }

    /// Upload `file` into `folder` (or the default folder).
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    pub async fn upload(
        &self,
        file: UploadFile,
        folder: Option<&str>,
    ) -> Result<CloudinaryUploadResponse, MediaError> {
        let folder = folder
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(self.config.default_folder.as_str());
        let signed = self.sign_upload(folder, lib_utils::unix_timestamp());

        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaError::InvalidRequest(format!("Invalid content type: {}", e)))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("folder", signed.folder)
            .text("timestamp", signed.timestamp.to_string())
            .text("api_key", signed.api_key)
            .text("signature", signed.signature);

        debug!(folder = %folder, "[MEDIA] Posting signed upload");
        let response = self.http.post(self.upload_url()).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CloudinaryErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), message = %message, "[MEDIA] Upload rejected");
            return Err(MediaError::Rejected { status: status.as_u16(), message });
        }

        let uploaded: CloudinaryUploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Transport(format!("Failed to parse upload response: {}", e)))?;

        info!(public_id = %uploaded.public_id, bytes = uploaded.bytes, "[MEDIA] Upload complete");
        Ok(uploaded)
    }

    pub fn image_url(&self, public_id: &str) -> String {
        url::image_url(&self.config.delivery_base, &self.config.cloud_name, public_id)
    }

    pub fn optimized_url(&self, public_id: &str, options: &TransformOptions) -> String {
        url::optimized_url(&self.config.delivery_base, &self.config.cloud_name, public_id, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::sha1_hex;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_base: &str) -> CloudinaryConfig {
        CloudinaryConfig::new("demo", "123456", "s3cr3t", "steel").with_api_base(api_base)
    }

    fn test_file() -> UploadFile {
        UploadFile {
            bytes: b"fake-png-bytes".to_vec(),
            file_name: "beam.png".to_string(),
            content_type: Some("image/png".to_string()),
        }
    }

    #[test]
    fn test_sign_upload_covers_folder_and_timestamp() {
        let client = CloudinaryClient::new(test_config(DEFAULT_API_BASE)).unwrap();
        let signed = client.sign_upload("sliders", 1700000000);

        assert_eq!(signed.api_key, "123456");
        assert_eq!(signed.signature, sha1_hex("folder=sliders&timestamp=1700000000s3cr3t"));
    }

    #[test]
    fn test_upload_url() {
        let client = CloudinaryClient::new(test_config("http://localhost:9999/v1_1/")).unwrap();
        assert_eq!(client.upload_url(), "http://localhost:9999/v1_1/demo/image/upload");
    }

    #[tokio::test]
    async fn test_upload_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/demo/image/upload"))
            .and(body_string_contains("name=\"signature\""))
            .and(body_string_contains("name=\"api_key\""))
            .and(body_string_contains("products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "public_id": "products/beam",
                "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/products/beam.png",
                "format": "png",
                "width": 640,
                "height": 480,
                "bytes": 14,
                "created_at": "2025-10-19T08:00:00Z",
                "etag": "ignored"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudinaryClient::new(test_config(&server.uri())).unwrap();
        let uploaded = client.upload(test_file(), Some("products")).await.unwrap();

        assert_eq!(uploaded.public_id, "products/beam");
        assert_eq!(uploaded.width, 640);
        assert_eq!(uploaded.bytes, 14);
    }

    #[tokio::test]
    async fn test_upload_rejection_surfaces_cloudinary_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/demo/image/upload"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid Signature abc" }
            })))
            .mount(&server)
            .await;

        let client = CloudinaryClient::new(test_config(&server.uri())).unwrap();
        let err = client.upload(test_file(), None).await.unwrap_err();

        match &err {
            MediaError::Rejected { status, message } => {
                assert_eq!(*status, 401);
                assert_eq!(message, "Invalid Signature abc");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(err.user_message(), "Invalid Signature abc");
    }

    #[tokio::test]
    async fn test_upload_unreachable_host_is_generic() {
        // Nothing listens on port 9 (discard) on the loopback in test environments
        let client = CloudinaryClient::new(test_config("http://127.0.0.1:9")).unwrap();
        let err = client.upload(test_file(), None).await.unwrap_err();

        assert!(matches!(err, MediaError::Transport(_)));
        assert_eq!(err.user_message(), crate::error::UPLOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_optimized_url_uses_cloud_name() {
        let client = CloudinaryClient::new(test_config(DEFAULT_API_BASE)).unwrap();
        let url = client.optimized_url("products/beam", &TransformOptions::default().width(400));
        assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/w_400,q_auto,f_auto/products/beam");
    }
}
