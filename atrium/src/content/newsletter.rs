use super::validation::{email, optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Result;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub subscribed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeInput {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl SubscribeInput {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            email: email(&self.email)?,
            name: optional(self.name),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsubscribeInput {
    pub email: String,
}
