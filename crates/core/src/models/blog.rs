//! Blog post record and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::{timestamp, DbId, Timestamp};

/// A blog post as returned by `/api/blogs` and `/api/admin/blogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub featured_image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub read_time: Option<i32>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub published_at: Option<Timestamp>,
}

impl Blog {
    /// Date shown on the post: publication date, else creation date.
    pub fn display_date(&self) -> Timestamp {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// DTO for `POST /api/admin/blogs`. The CMS derives the slug from the title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBlog {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
    pub published: bool,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for `PUT /api/admin/blogs/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBlog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<DbId>>,
}
