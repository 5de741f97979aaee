//! CMS record types and request DTOs.
//!
//! Response records mirror what the CMS returns; `Create*` DTOs carry every
//! writable field and `Update*` DTOs make every field optional, skipping
//! unset ones so a partial update only touches what the admin changed.

pub mod asset;
pub mod auth;
pub mod blog;
pub mod project;
pub mod service;
pub mod stats;
pub mod taxonomy;
pub mod tool;

pub use asset::{UploadMeta, UploadedAsset};
pub use auth::{LoginRequest, TokenResponse};
pub use blog::{Blog, CreateBlog, UpdateBlog};
pub use project::{CreateProject, Project, UpdateProject};
pub use service::{CreateService, Service, UpdateService};
pub use stats::Stats;
pub use taxonomy::{Category, Tag};
pub use tool::Tool;

/// Counter returned by `POST /api/blogs/{slug}/like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LikeCount {
    pub likes: i64,
}

/// Counter returned by `POST /api/tools/{slug}/click`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClickCount {
    pub clicks: i64,
}
