use super::validation::{email, optional, required};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::str::FromStr;

/// "Get involved" submission families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionKind {
    Membership,
    Donation,
    Feedback,
    Idea,
    Partnership,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 5] = [
        SubmissionKind::Membership,
        SubmissionKind::Donation,
        SubmissionKind::Feedback,
        SubmissionKind::Idea,
        SubmissionKind::Partnership,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Membership => "membership",
            SubmissionKind::Donation => "donation",
            SubmissionKind::Feedback => "feedback",
            SubmissionKind::Idea => "idea",
            SubmissionKind::Partnership => "partnership",
        }
    }

    /// Route segment, e.g. `/api/get-involved/donations`.
    pub fn collection(self) -> &'static str {
        match self {
            SubmissionKind::Membership => "membership",
            SubmissionKind::Donation => "donations",
            SubmissionKind::Feedback => "feedback",
            SubmissionKind::Idea => "ideas",
            SubmissionKind::Partnership => "partnerships",
        }
    }
}

impl FromStr for SubmissionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.collection() == s)
            .ok_or_else(|| Error::validation(format!("unknown submission kind '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Pending,
        SubmissionStatus::Reviewed,
        SubmissionStatus::Accepted,
        SubmissionStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Error::validation("status must be one of pending, reviewed, accepted, rejected")
            })
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub kind: SubmissionKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub message: Option<String>,
    pub amount: Option<f64>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl SubmissionInput {
    pub fn validate(self, kind: SubmissionKind) -> Result<Self> {
        let input = Self {
            name: required("name", &self.name)?,
            email: email(&self.email)?,
            phone: optional(self.phone),
            organization: optional(self.organization),
            message: optional(self.message),
            amount: self.amount,
        };

        match kind {
            SubmissionKind::Donation => match input.amount {
                Some(amount) if amount.is_finite() && amount > 0.0 => Ok(input),
                _ => Err(Error::validation("amount must be a positive number")),
            },
            SubmissionKind::Partnership if input.organization.is_none() => {
                Err(Error::validation("organization is required for partnerships"))
            }
            SubmissionKind::Feedback | SubmissionKind::Idea if input.message.is_none() => {
                Err(Error::validation("message is required"))
            }
            _ => Ok(Self {
                amount: None,
                ..input
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionFilter {
    pub kind: Option<SubmissionKind>,
    pub status: Option<SubmissionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: Option<f64>) -> SubmissionInput {
        SubmissionInput {
            name: "Ada".into(),
            email: "ada@example.org".into(),
            phone: None,
            organization: None,
            message: None,
            amount,
        }
    }

    #[test]
    fn test_kind_from_collection_segment() {
        assert_eq!("donations".parse::<SubmissionKind>().unwrap(), SubmissionKind::Donation);
        assert_eq!("idea".parse::<SubmissionKind>().unwrap(), SubmissionKind::Idea);
        assert!("volunteers".parse::<SubmissionKind>().is_err());
    }

    #[test]
    fn test_donation_requires_positive_amount() {
        assert!(input(None).validate(SubmissionKind::Donation).is_err());
        assert!(input(Some(-5.0)).validate(SubmissionKind::Donation).is_err());
        assert!(input(Some(25.0)).validate(SubmissionKind::Donation).is_ok());
    }

    #[test]
    fn test_amount_dropped_for_other_kinds() {
        let membership = input(Some(10.0)).validate(SubmissionKind::Membership).unwrap();
        assert_eq!(membership.amount, None);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(" Accepted ".parse::<SubmissionStatus>().unwrap(), SubmissionStatus::Accepted);
        assert!("archived".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_feedback_requires_message() {
        assert!(input(None).validate(SubmissionKind::Feedback).is_err());
    }
}
