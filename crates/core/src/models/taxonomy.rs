//! Categories and tags used to filter blogs and projects.

use serde::{Deserialize, Serialize};

use crate::types::{timestamp, DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<Timestamp>,
}
