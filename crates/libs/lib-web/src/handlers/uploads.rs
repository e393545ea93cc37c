//! # Upload Handler
//!
//! `POST /api/admin/uploads` takes a multipart form with a `file` part and an
//! optional `folder` field, forwards it to Cloudinary as a signed upload and
//! returns Cloudinary's response plus an optimized delivery URL.
//!
//! Query parameters `width`, `height`, `quality`, `format` shape the
//! optimized URL (`quality`/`format` default to `auto`).

use axum::extract::{multipart::MultipartError, Json, Multipart, Query, State};
use lib_core::AppError;
use lib_media::{CloudinaryClient, CloudinaryUploadResponse, MediaError, TransformOptions, UploadFile};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const MISSING_FILE_MESSAGE: &str = "Vui lòng chọn ảnh để tải lên";

#[derive(Debug, Serialize)]
pub struct UploadResult {
    #[serde(flatten)]
    pub upload: CloudinaryUploadResponse,
    pub optimized_url: String,
}

#[instrument(skip_all)]
pub async fn upload_image(
    State(media): State<Arc<CloudinaryClient>>,
    Query(options): Query<TransformOptions>,
    mut multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let mut file = None;
    let mut folder = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some(UploadFile {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
            Some("folder") => folder = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(|| AppError::InvalidInput(MISSING_FILE_MESSAGE.to_string()))?;

    let upload = media.upload(file, folder.as_deref()).await.map_err(media_error)?;
    let optimized_url = media.optimized_url(&upload.public_id, &options);

    info!(public_id = %upload.public_id, "[UPLOAD] Image stored");
    Ok(Json(UploadResult { upload, optimized_url }))
}

fn bad_multipart(err: MultipartError) -> AppError {
    warn!("[UPLOAD] Bad multipart body: {}", err);
    AppError::InvalidInput(MISSING_FILE_MESSAGE.to_string())
}

fn media_error(err: MediaError) -> AppError {
    match err {
        MediaError::InvalidRequest(_) => AppError::InvalidInput(err.user_message()),
        MediaError::Rejected { .. } | MediaError::Transport(_) => AppError::Upstream(err.user_message()),
    }
}
