//! Image upload metadata and result.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Folder used when the caller does not name one.
pub const DEFAULT_UPLOAD_FOLDER: &str = "general";

/// Form fields sent alongside the file in `POST /api/admin/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub folder: String,
    pub used_in: Option<String>,
    pub used_in_id: Option<DbId>,
    pub alt_text: Option<String>,
}

impl Default for UploadMeta {
    fn default() -> Self {
        Self {
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            used_in: None,
            used_in_id: None,
            alt_text: None,
        }
    }
}

/// Stored asset returned by the upload endpoint. The CMS derives the
/// thumbnail / medium / large variants from the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub id: DbId,
    pub filename: String,
    pub storage_url: String,
    pub thumbnail_url: Option<String>,
    pub medium_url: Option<String>,
    pub large_url: Option<String>,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}
