//! Product image upload ingestion.
//!
//! The catalog core never handles image bytes; it stores a reference
//! string. This service turns an uploaded multipart file into such a
//! reference: the file lands in the uploads directory under a unique name
//! and the product's `image` field becomes `/uploads/<filename>`.

use std::path::PathBuf;

use axum::body::Bytes;
use thiserror::Error;
use uuid::Uuid;

/// Image content types accepted for upload.
const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Errors raised while ingesting an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only images allowed!")]
    UnsupportedType(String),

    #[error("Image exceeds the {max_bytes} byte upload limit")]
    TooLarge { max_bytes: usize },

    #[error("upload write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploaded images to disk and hands back their public path.
#[derive(Debug, Clone)]
pub struct UploadService {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    #[must_use]
    pub const fn new(dir: PathBuf, max_bytes: usize) -> Self {
        Self { dir, max_bytes }
    }

    /// Validate and persist one uploaded image.
    ///
    /// Returns the public reference path (`/uploads/<filename>`) to store
    /// on the product.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedType` for non-image content types,
    /// `UploadError::TooLarge` past the configured cap, and
    /// `UploadError::Io` if the file cannot be written.
    pub async fn save_image(
        &self,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, UploadError> {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(UploadError::UnsupportedType(content_type.to_owned()));
        }
        if data.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                max_bytes: self.max_bytes,
            });
        }

        let filename = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), &data).await?;

        Ok(format!("/uploads/{filename}"))
    }
}

/// Collapse whitespace to underscores and drop path-hostile characters so
/// the original name survives as a readable suffix.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    if cleaned.is_empty() {
        "image".to_owned()
    } else {
        cleaned
    }
}
