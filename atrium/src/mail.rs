use crate::content::ContactMessage;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use shared::config::SmtpConfig;
use shared::{Error, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Outbound notification channel.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Delivers over SMTP with the configured relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| Error::Mail(format!("invalid sender '{}': {}", config.from, e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| Error::Mail(e.to_string()))?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host = %config.host, port = config.port, "SMTP mailer configured");
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| Error::Mail(format!("invalid recipient '{}': {}", message.to, e)))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = message.reply_to.as_deref() {
            let reply_to = reply_to
                .parse::<Mailbox>()
                .map_err(|e| Error::Mail(format!("invalid reply-to '{}': {}", reply_to, e)))?;
            builder = builder.reply_to(reply_to);
        }

        let email = builder
            .body(message.body)
            .map_err(|e| Error::Mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;

        debug!(to = %message.to, "Email delivered");
        Ok(())
    }
}

/// Used when no SMTP relay is configured: messages are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "SMTP not configured, email not sent"
        );
        Ok(())
    }
}

/// Notification sent to the site owners for a new contact form message.
pub fn contact_notification(message: &ContactMessage, recipient: &str) -> EmailMessage {
    let subject = match message.subject.as_deref() {
        Some(subject) => format!("[Contact] {}", subject),
        None => format!("[Contact] Message from {}", message.name),
    };

    EmailMessage {
        to: recipient.to_string(),
        reply_to: Some(message.email.clone()),
        subject,
        body: format!(
            "From: {} <{}>\nReceived: {}\n\n{}",
            message.name,
            message.email,
            message.created_at.to_rfc3339(),
            message.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(subject: Option<&str>) -> ContactMessage {
        ContactMessage {
            id: 1,
            name: "Lin".into(),
            email: "lin@example.org".into(),
            subject: subject.map(String::from),
            message: "Do you offer studio tours?".into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_notification() {
        let email = contact_notification(&message(Some("Tours")), "office@atrium.org");
        assert_eq!(email.to, "office@atrium.org");
        assert_eq!(email.reply_to.as_deref(), Some("lin@example.org"));
        assert_eq!(email.subject, "[Contact] Tours");
        assert!(email.body.contains("Do you offer studio tours?"));

        let untitled = contact_notification(&message(None), "office@atrium.org");
        assert_eq!(untitled.subject, "[Contact] Message from Lin");
    }

    #[tokio::test]
    async fn test_log_mailer_never_fails() {
        let email = contact_notification(&message(None), "office@atrium.org");
        assert!(LogMailer.send(email).await.is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender() {
        let config = SmtpConfig {
            host: "smtp.example.org".into(),
            port: 587,
            username: None,
            password: None,
            from: "not an address".into(),
        };
        assert!(matches!(SmtpMailer::new(&config), Err(Error::Mail(_))));
    }
}
