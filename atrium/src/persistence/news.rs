use super::{db_error, total};
use crate::content::{NewsArticle, NewsFilter, NewsInput, NewsKind, PageRequest};
use crate::ports::NewsRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

// Articles are listed newest first; events in calendar order.
const LIST_NEWS: &str = "SELECT id, kind, title, summary, content, image_url, event_date, location, created_at, updated_at
     FROM news
     WHERE kind = ?1 AND (?2 = 0 OR event_date >= ?3)
     ORDER BY created_at DESC, id DESC
     LIMIT ?4 OFFSET ?5";

const LIST_EVENTS: &str = "SELECT id, kind, title, summary, content, image_url, event_date, location, created_at, updated_at
     FROM news
     WHERE kind = ?1 AND (?2 = 0 OR event_date >= ?3)
     ORDER BY event_date ASC, id ASC
     LIMIT ?4 OFFSET ?5";

#[derive(Clone)]
pub struct SqliteNewsRepository {
    pool: SqlitePool,
}

impl SqliteNewsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for SqliteNewsRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        kind: NewsKind,
        filter: &NewsFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<NewsArticle>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);
        let now = Utc::now();
        let sql = match kind {
            NewsKind::News => LIST_NEWS,
            NewsKind::Event => LIST_EVENTS,
        };

        let rows = sqlx::query_as::<_, NewsArticle>(sql)
            .bind(kind)
            .bind(filter.upcoming)
            .bind(now)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list news"))?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM news WHERE kind = ?1 AND (?2 = 0 OR event_date >= ?3)",
        )
        .bind(kind)
        .bind(filter.upcoming)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count news"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self))]
    async fn get(&self, kind: NewsKind, id: i64) -> Result<Option<NewsArticle>> {
        sqlx::query_as::<_, NewsArticle>(
            "SELECT id, kind, title, summary, content, image_url, event_date, location, created_at, updated_at
             FROM news WHERE id = ? AND kind = ?",
        )
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch news"))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, kind: NewsKind, input: NewsInput) -> Result<NewsArticle> {
        let now = Utc::now();
        sqlx::query_as::<_, NewsArticle>(
            "INSERT INTO news (kind, title, summary, content, image_url, event_date, location, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, kind, title, summary, content, image_url, event_date, location, created_at, updated_at",
        )
        .bind(kind)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(input.event_date)
        .bind(&input.location)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create news"))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, kind: NewsKind, id: i64, input: NewsInput) -> Result<Option<NewsArticle>> {
        sqlx::query_as::<_, NewsArticle>(
            "UPDATE news
             SET title = ?, summary = ?, content = ?, image_url = ?, event_date = ?, location = ?, updated_at = ?
             WHERE id = ? AND kind = ?
             RETURNING id, kind, title, summary, content, image_url, event_date, location, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(input.event_date)
        .bind(&input.location)
        .bind(Utc::now())
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update news"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: NewsKind, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = ? AND kind = ?")
            .bind(id)
            .bind(kind)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete news"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_pool;
    use chrono::Duration;

    fn event(title: &str, in_days: i64) -> NewsInput {
        NewsInput {
            title: title.into(),
            summary: None,
            content: None,
            image_url: None,
            event_date: Some(Utc::now() + Duration::days(in_days)),
            location: Some("Main hall".into()),
        }
    }

    #[tokio::test]
    async fn test_events_in_calendar_order_and_upcoming_filter() {
        let repo = SqliteNewsRepository::new(test_pool().await);
        repo.create(NewsKind::Event, event("later", 30)).await.unwrap();
        repo.create(NewsKind::Event, event("past", -3)).await.unwrap();
        repo.create(NewsKind::Event, event("soon", 2)).await.unwrap();

        let (all, count) = repo
            .list(NewsKind::Event, &NewsFilter::default(), None)
            .await
            .unwrap();
        assert_eq!(count, 3);
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["past", "soon", "later"]);

        let upcoming = NewsFilter { upcoming: true };
        let (rows, count) = repo.list(NewsKind::Event, &upcoming, None).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(rows[0].title, "soon");
    }

    #[tokio::test]
    async fn test_news_and_events_do_not_mix() {
        let repo = SqliteNewsRepository::new(test_pool().await);
        let mut article = event("Award shortlist", 0);
        article.event_date = None;
        let created = repo.create(NewsKind::News, article).await.unwrap();

        let (events, _) = repo
            .list(NewsKind::Event, &NewsFilter::default(), None)
            .await
            .unwrap();
        assert!(events.is_empty());
        assert!(repo.get(NewsKind::Event, created.id).await.unwrap().is_none());
        assert!(repo.delete(NewsKind::News, created.id).await.unwrap());
    }
}
