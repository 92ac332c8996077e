use super::validation::{optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Result;

/// Catalogue entry (projects, publications, exhibits).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ItemInput {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            title: required("title", &self.title)?,
            description: optional(self.description),
            category: optional(self.category),
            image_url: optional(self.image_url),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
}
