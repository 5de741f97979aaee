//! Tool directory record.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::json_list;
use crate::types::{timestamp, DbId, Timestamp};

fn default_true() -> bool {
    true
}

/// A tool as returned by `/api/tools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub logo: Option<String>,
    pub icon: Option<String>,
    pub screenshot: Option<String>,
    pub website_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub category: Option<String>,
    pub tech_stack: Option<String>,
    pub features: Option<String>,
    pub pricing: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub clicks: i64,
    pub rating: Option<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

impl Tool {
    pub fn feature_list(&self) -> Result<Vec<String>, CoreError> {
        json_list::decode("features", self.features.as_deref())
    }

    /// Where a click on the tool card should lead.
    pub fn primary_link(&self) -> Option<&str> {
        self.website_url
            .as_deref()
            .or(self.demo_url.as_deref())
            .or(self.github_url.as_deref())
    }
}
