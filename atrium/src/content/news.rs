use super::validation::{optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NewsKind {
    News,
    Event,
}

impl NewsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NewsKind::News => "news",
            NewsKind::Event => "event",
        }
    }

    pub fn collection(self) -> &'static str {
        match self {
            NewsKind::News => "news",
            NewsKind::Event => "events",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub kind: NewsKind,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsInput {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewsInput {
    /// Events must carry a date; plain news never does.
    pub fn validate(self, kind: NewsKind) -> Result<Self> {
        let event_date = match kind {
            NewsKind::Event => Some(
                self.event_date
                    .ok_or_else(|| Error::validation("eventDate is required for events"))?,
            ),
            NewsKind::News => None,
        };

        Ok(Self {
            title: required("title", &self.title)?,
            summary: optional(self.summary),
            content: optional(self.content),
            image_url: optional(self.image_url),
            event_date,
            location: optional(self.location),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NewsFilter {
    /// Only events dated from now on.
    #[serde(default)]
    pub upcoming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_requires_date() {
        let input = NewsInput {
            title: "Open studio night".into(),
            summary: None,
            content: None,
            image_url: None,
            event_date: None,
            location: Some("Hall B".into()),
        };

        assert!(input.clone().validate(NewsKind::Event).is_err());
        let news = input.validate(NewsKind::News).unwrap();
        assert!(news.event_date.is_none());
    }
}
