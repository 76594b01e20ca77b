//! Data-URI decoding and on-disk image storage.
//!
//! Stored paths are relative to the upload root and never escape it.

use std::path::{Component, Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// Image formats accepted in data URIs
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Sub-directory of the upload dir holding recipe images
const RECIPE_IMAGE_DIR: &str = "recipes";

/// A decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Decode a `data:image/<ext>;base64,<payload>` URI
///
/// # Errors
/// Returns `AppError::InvalidImage` for a malformed URI, an unsupported
/// format, an empty payload or one larger than `max_bytes`.
pub fn decode_data_uri(uri: &str, max_bytes: usize) -> AppResult<DecodedImage> {
    let rest = uri
        .trim()
        .strip_prefix("data:image/")
        .ok_or_else(|| AppError::InvalidImage("expected a data:image/... URI".to_string()))?;
    let (format, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::InvalidImage("expected base64 encoding".to_string()))?;

    let format = format.to_lowercase();
    let extension = ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| *ext == format)
        .ok_or_else(|| AppError::InvalidImage(format!("unsupported image format: {format}")))?;

    // Cheap upper bound before decoding
    if payload.len() / 4 * 3 > max_bytes + 3 {
        return Err(AppError::InvalidImage(format!(
            "image exceeds {max_bytes} bytes"
        )));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::InvalidImage(format!("bad base64 payload: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::InvalidImage("image is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::InvalidImage(format!(
            "image exceeds {max_bytes} bytes"
        )));
    }

    Ok(DecodedImage { extension, bytes })
}

/// Writes and removes recipe images on the local filesystem
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    media_url: String,
    max_bytes: usize,
}

impl ImageStorage {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.upload_dir),
            media_url: config.media_url.clone(),
            max_bytes: config.max_file_size_bytes(),
        }
    }

    /// Root directory served under the media URL
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL of a stored path
    #[must_use]
    pub fn url(&self, stored_path: &str) -> String {
        format!("{}/{}", self.media_url.trim_end_matches('/'), stored_path)
    }

    /// Decode and store a data URI, returning the path relative to the root
    ///
    /// # Errors
    /// Returns `InvalidImage` for a bad URI and `Storage` for I/O failures
    #[instrument(skip(self, data_uri))]
    pub async fn save(&self, data_uri: &str) -> AppResult<String> {
        let image = decode_data_uri(data_uri, self.max_bytes)?;
        let relative = format!("{RECIPE_IMAGE_DIR}/{}.{}", Uuid::new_v4(), image.extension);

        let dir = self.root.join(RECIPE_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {e}", dir.display())))?;

        let path = self.root.join(&relative);
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {e}", path.display())))?;

        debug!(path = %relative, size = image.bytes.len(), "Stored recipe image");
        Ok(relative)
    }

    /// Remove a stored image; a missing file is not an error
    ///
    /// # Errors
    /// Returns `Storage` if the path escapes the root or removal fails
    #[instrument(skip(self))]
    pub async fn remove(&self, stored_path: &str) -> AppResult<()> {
        let relative = Path::new(stored_path);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(AppError::Storage(format!("refusing to remove {stored_path}")));
        }

        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %stored_path, "Recipe image already gone");
                Ok(())
            }
            Err(e) => Err(AppError::Storage(format!("remove {stored_path}: {e}"))),
        }
    }
}
