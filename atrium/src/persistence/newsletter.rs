use super::{db_error, total};
use crate::content::{PageRequest, SubscribeInput, Subscriber};
use crate::ports::NewsletterRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteNewsletterRepository {
    pool: SqlitePool,
}

impl SqliteNewsletterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsletterRepository for SqliteNewsletterRepository {
    #[instrument(skip(self))]
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<Subscriber>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, Subscriber>(
            "SELECT id, email, name, subscribed, created_at, updated_at
             FROM newsletter_subscribers
             WHERE subscribed = 1
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list subscribers"))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers WHERE subscribed = 1")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count subscribers"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn subscribe(&self, input: SubscribeInput) -> Result<Subscriber> {
        let now = Utc::now();
        sqlx::query_as::<_, Subscriber>(
            "INSERT INTO newsletter_subscribers (email, name, subscribed, created_at, updated_at)
             VALUES (?1, ?2, 1, ?3, ?3)
             ON CONFLICT(email) DO UPDATE SET
                 subscribed = 1,
                 name = COALESCE(excluded.name, newsletter_subscribers.name),
                 updated_at = excluded.updated_at
             RETURNING id, email, name, subscribed, created_at, updated_at",
        )
        .bind(&input.email)
        .bind(&input.name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to subscribe"))
    }

    #[instrument(skip(self))]
    async fn unsubscribe(&self, email: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE newsletter_subscribers SET subscribed = 0, updated_at = ? WHERE email = ?",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to unsubscribe"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_pool;

    fn input(email: &str, name: Option<&str>) -> SubscribeInput {
        SubscribeInput {
            email: email.into(),
            name: name.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let repo = SqliteNewsletterRepository::new(test_pool().await);
        let first = repo.subscribe(input("ana@example.org", Some("Ana"))).await.unwrap();
        let again = repo.subscribe(input("ana@example.org", None)).await.unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(again.name.as_deref(), Some("Ana"));
        assert_eq!(repo.list(None).await.unwrap().1, 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_and_resubscribe() {
        let repo = SqliteNewsletterRepository::new(test_pool().await);
        repo.subscribe(input("ana@example.org", None)).await.unwrap();

        assert!(repo.unsubscribe("ana@example.org").await.unwrap());
        assert!(!repo.unsubscribe("nobody@example.org").await.unwrap());
        assert_eq!(repo.list(None).await.unwrap().1, 0);

        let back = repo.subscribe(input("ana@example.org", None)).await.unwrap();
        assert!(back.subscribed);
        assert_eq!(repo.list(None).await.unwrap().1, 1);
    }
}
