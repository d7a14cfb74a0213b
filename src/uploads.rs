//! Storage for uploaded event images. Images land in the configured
//! uploads directory and are served back under `/uploads`.

use std::path::Path;

use axum::extract::multipart::Field;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Matches the client-side cap; anything larger is rejected outright.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Validates and stores one uploaded image field, returning the public
/// URL path for the stored file.
pub async fn store_event_image(field: Field<'_>, dir: &str) -> Result<String> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Image upload is missing a file name".to_string()))?;

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(
            "Only jpg, jpeg, png, gif and webp images are accepted".to_string(),
        ));
    }

    if let Some(content_type) = field.content_type() {
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(
                "Uploaded file is not an image".to_string(),
            ));
        }
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(
            "Image exceeds the 5MB upload limit".to_string(),
        ));
    }

    let stored_name = format!("event-{}.{}", Uuid::new_v4(), extension);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads dir: {}", e)))?;
    tokio::fs::write(Path::new(dir).join(&stored_name), &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    Ok(format!("/uploads/{}", stored_name))
}
