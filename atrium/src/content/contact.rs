use super::validation::{email, optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Result;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactInput {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: required("name", &self.name)?,
            email: email(&self.email)?,
            subject: optional(self.subject),
            message: required("message", &self.message)?,
        })
    }
}
