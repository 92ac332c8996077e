use super::{db_error, total};
use crate::content::{ContactInput, ContactMessage, PageRequest};
use crate::ports::ContactRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    #[instrument(skip(self))]
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<ContactMessage>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, is_read, created_at
             FROM contact_messages
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list contact messages"))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count contact messages"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: ContactInput) -> Result<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "INSERT INTO contact_messages (name, email, subject, message, is_read, created_at)
             VALUES (?, ?, ?, ?, 0, ?)
             RETURNING id, name, email, subject, message, is_read, created_at",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to store contact message"))
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: i64) -> Result<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET is_read = 1 WHERE id = ?
             RETURNING id, name, email, subject, message, is_read, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to mark contact message read"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete contact message"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_pool;

    #[tokio::test]
    async fn test_store_and_mark_read() {
        let repo = SqliteContactRepository::new(test_pool().await);
        let message = repo
            .create(ContactInput {
                name: "Lin".into(),
                email: "lin@example.org".into(),
                subject: None,
                message: "Do you offer studio tours?".into(),
            })
            .await
            .unwrap();
        assert!(!message.is_read);

        let read = repo.mark_read(message.id).await.unwrap().unwrap();
        assert!(read.is_read);
        assert!(repo.mark_read(404).await.unwrap().is_none());

        assert!(repo.delete(message.id).await.unwrap());
        assert_eq!(repo.list(None).await.unwrap().1, 0);
    }
}
