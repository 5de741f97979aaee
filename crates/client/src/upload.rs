//! Image files picked for upload, checked before anything is sent.

use std::path::Path;

use folio_core::error::CoreError;

use crate::error::ClientError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "Image size must be less than 5MB";

/// An image selected in an admin form.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    /// Build a file, rejecting non-images and anything over 5 MiB.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let file = Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        };
        file.validate()?;
        Ok(file)
    }

    /// Read a file from disk, inferring the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, content_type_for(path), bytes)?)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.content_type.starts_with("image/") {
            return Err(CoreError::Validation(INVALID_IMAGE_MESSAGE.into()));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(CoreError::Validation(IMAGE_TOO_LARGE_MESSAGE.into()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
