use super::validation::{optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Design,
    Testimonial,
}

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Photo,
        MediaKind::Video,
        MediaKind::Design,
        MediaKind::Testimonial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Design => "design",
            MediaKind::Testimonial => "testimonial",
        }
    }

    /// Route segment for the family, e.g. `/api/photos`.
    pub fn collection(self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
            MediaKind::Design => "designs",
            MediaKind::Testimonial => "testimonials",
        }
    }

    pub fn from_collection(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == segment)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.collection() == s)
            .ok_or_else(|| Error::validation(format!("unknown media kind '{}'", s)))
    }
}

/// Photo, video, design or testimonial. Testimonials use `author` and keep
/// the quote in `description`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub kind: MediaKind,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl MediaInput {
    pub fn validate(self, kind: MediaKind) -> Result<Self> {
        let input = Self {
            title: required("title", &self.title)?,
            description: optional(self.description),
            url: optional(self.url),
            thumbnail_url: optional(self.thumbnail_url),
            author: optional(self.author),
        };

        match kind {
            MediaKind::Testimonial if input.description.is_none() => {
                Err(Error::validation("description is required for testimonials"))
            }
            MediaKind::Photo | MediaKind::Video | MediaKind::Design if input.url.is_none() => {
                Err(Error::validation(format!("url is required for {}s", kind)))
            }
            _ => Ok(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(url: Option<&str>, description: Option<&str>) -> MediaInput {
        MediaInput {
            title: "Courtyard".into(),
            description: description.map(String::from),
            url: url.map(String::from),
            thumbnail_url: None,
            author: None,
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("photo".parse::<MediaKind>().unwrap(), MediaKind::Photo);
        assert_eq!("designs".parse::<MediaKind>().unwrap(), MediaKind::Design);
        assert!("poster".parse::<MediaKind>().is_err());
        assert_eq!(MediaKind::from_collection("testimonials"), Some(MediaKind::Testimonial));
        assert_eq!(MediaKind::from_collection("testimonial"), None);
    }

    #[test]
    fn test_kind_specific_requirements() {
        assert!(input(None, None).validate(MediaKind::Photo).is_err());
        assert!(input(Some("/uploads/a.jpg"), None).validate(MediaKind::Photo).is_ok());
        assert!(input(None, None).validate(MediaKind::Testimonial).is_err());
        assert!(input(None, Some("Great studio")).validate(MediaKind::Testimonial).is_ok());
    }
}
