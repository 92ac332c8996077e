use super::validation::{optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Result;

/// Courses, workshops and learning material.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl EducationInput {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            title: required("title", &self.title)?,
            description: optional(self.description),
            category: optional(self.category),
            content: optional(self.content),
            image_url: optional(self.image_url),
        })
    }
}
