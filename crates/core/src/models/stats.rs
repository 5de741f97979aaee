use serde::{Deserialize, Serialize};

/// Site-wide counters from `GET /api/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub blogs: i64,
    #[serde(default)]
    pub projects: i64,
    #[serde(default)]
    pub services: i64,
    #[serde(default)]
    pub tools: i64,
    #[serde(default)]
    pub blog_views: i64,
    #[serde(default)]
    pub project_views: i64,
    #[serde(default)]
    pub total_views: i64,
}
