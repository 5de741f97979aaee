//! Project (store showcase) record and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::json_list;
use crate::types::{timestamp, DbId, Timestamp};

/// Status assigned by the CMS when none is given.
pub const DEFAULT_PROJECT_STATUS: &str = "completed";

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}

/// A project as returned by `/api/projects` and `/api/admin/projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    pub featured_image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub demo_video_url: Option<String>,
    /// JSON-encoded list of image URLs.
    pub gallery_images: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    /// JSON-encoded list of technologies.
    pub tech_stack: Option<String>,
    pub client: Option<String>,
    pub duration: Option<String>,
    pub team_size: Option<i32>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub forks: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub published_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<Timestamp>,
}

impl Project {
    pub fn tech_stack_list(&self) -> Result<Vec<String>, CoreError> {
        json_list::decode("tech_stack", self.tech_stack.as_deref())
    }

    pub fn gallery_list(&self) -> Result<Vec<String>, CoreError> {
        json_list::decode("gallery_images", self.gallery_images.as_deref())
    }
}

/// DTO for `POST /api/admin/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    pub published: bool,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for `PUT /api/admin/projects/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<DbId>>,
}
