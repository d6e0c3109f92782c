//! Image upload endpoint for logos, featured images, and rich-text inserts.
//!
//! Files are validated by magic bytes, renamed to a UUID, and stored under
//! the configured upload directory, which the router serves as static
//! files. The response carries the public URL the editor embeds.

use axum::extract::{Multipart, State};
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Response for a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
}

fn validate_image_magic_bytes(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        // GIF: 47 49 46 38
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        // WebP: 52 49 46 46 ... 57 45 42 50
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// POST /api/admin/uploads - Store an image and return its public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return error(
                AppError::Validation("No file in upload".to_string()),
                revision_id,
            )
        }
        Err(e) => {
            return error(
                AppError::BadRequest(format!("Malformed multipart body: {}", e)),
                revision_id,
            )
        }
    };

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return error(
                AppError::BadRequest(format!("Failed to read upload: {}", e)),
                revision_id,
            )
        }
    };

    if bytes.len() > MAX_FILE_SIZE {
        return error(
            AppError::Validation(format!(
                "File too large: {} bytes (max {})",
                bytes.len(),
                MAX_FILE_SIZE
            )),
            revision_id,
        );
    }

    let Some(mime_type) = validate_image_magic_bytes(&bytes) else {
        return error(
            AppError::Validation("Unsupported image format".to_string()),
            revision_id,
        );
    };

    let filename = format!(
        "{}.{}",
        uuid::Uuid::new_v4(),
        extension_for_mime(mime_type)
    );

    if let Err(e) = tokio::fs::create_dir_all(&state.config.upload_dir).await {
        tracing::error!("Failed to create upload directory: {}", e);
        return error(
            AppError::Internal("Failed to initialize upload directory".to_string()),
            revision_id,
        );
    }

    let path = state.config.upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        tracing::error!("Failed to store upload: {}", e);
        return error(
            AppError::Internal("Failed to store upload".to_string()),
            revision_id,
        );
    }

    success(
        UploadResponse {
            url: format!("/uploads/{}", filename),
            filename,
            size: bytes.len(),
            mime_type: mime_type.to_string(),
        },
        revision_id,
    )
}
