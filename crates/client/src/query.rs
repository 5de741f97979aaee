//! Query parameters for the public list endpoints. Unset fields are not
//! sent, so the CMS applies its own defaults.

use serde::Serialize;

use folio_core::types::DbId;

/// `GET /api/blogs`. The CMS only returns published posts here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// `GET /api/projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// `GET /api/services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Default for ServiceQuery {
    /// Public screens only list active services.
    fn default() -> Self {
        Self {
            active_only: Some(true),
            featured: None,
        }
    }
}

/// `GET /api/tools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Default for ToolQuery {
    fn default() -> Self {
        Self {
            category: None,
            active_only: Some(true),
            featured: None,
        }
    }
}
