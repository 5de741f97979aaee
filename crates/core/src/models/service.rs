//! Service listing record and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::json_list;
use crate::types::{timestamp, DbId, Timestamp};

/// Currency assumed by the CMS when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

/// A service as returned by `/api/services` and `/api/admin/services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    pub price: Option<f64>,
    pub price_range: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub pricing_model: Option<String>,
    pub icon: Option<String>,
    pub featured_image: Option<String>,
    /// JSON-encoded list of features.
    pub features: Option<String>,
    /// JSON-encoded list of deliverables.
    pub deliverables: Option<String>,
    pub duration: Option<String>,
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

impl Service {
    pub fn feature_list(&self) -> Result<Vec<String>, CoreError> {
        json_list::decode("features", self.features.as_deref())
    }

    pub fn deliverable_list(&self) -> Result<Vec<String>, CoreError> {
        json_list::decode("deliverables", self.deliverables.as_deref())
    }

    /// Human-readable price: the range when set, else amount and currency.
    pub fn price_label(&self) -> Option<String> {
        if let Some(range) = self.price_range.as_deref().filter(|r| !r.is_empty()) {
            return Some(range.to_string());
        }
        self.price
            .filter(|p| *p > 0.0)
            .map(|p| format!("{p:.2} {}", self.currency))
    }
}

/// DTO for `POST /api/admin/services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub active: bool,
    pub featured: bool,
    pub order: i32,
}

impl Default for CreateService {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            long_description: None,
            price: None,
            price_range: None,
            currency: default_currency(),
            pricing_model: None,
            icon: None,
            featured_image: None,
            features: None,
            deliverables: None,
            duration: None,
            active: true,
            featured: false,
            order: 0,
        }
    }
}

/// DTO for `PUT /api/admin/services/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}
