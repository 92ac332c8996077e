use super::{db_error, total};
use crate::content::{Media, MediaInput, MediaKind, PageRequest};
use crate::ports::MediaRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

/// Photos, videos, designs and testimonials share one table keyed by `kind`.
#[derive(Clone)]
pub struct SqliteMediaRepository {
    pool: SqlitePool,
}

impl SqliteMediaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for SqliteMediaRepository {
    #[instrument(skip(self))]
    async fn list(&self, kind: Option<MediaKind>, page: Option<PageRequest>) -> Result<(Vec<Media>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, Media>(
            "SELECT id, kind, title, description, url, thumbnail_url, author, created_at, updated_at
             FROM media
             WHERE (?1 IS NULL OR kind = ?1)
             ORDER BY created_at DESC, id DESC
             LIMIT ?2 OFFSET ?3",
        )
        .bind(kind)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list media"))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM media WHERE (?1 IS NULL OR kind = ?1)")
                .bind(kind)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count media"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self))]
    async fn get(&self, kind: MediaKind, id: i64) -> Result<Option<Media>> {
        sqlx::query_as::<_, Media>(
            "SELECT id, kind, title, description, url, thumbnail_url, author, created_at, updated_at
             FROM media WHERE id = ? AND kind = ?",
        )
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch media"))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, kind: MediaKind, input: MediaInput) -> Result<Media> {
        let now = Utc::now();
        sqlx::query_as::<_, Media>(
            "INSERT INTO media (kind, title, description, url, thumbnail_url, author, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, kind, title, description, url, thumbnail_url, author, created_at, updated_at",
        )
        .bind(kind)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.url)
        .bind(&input.thumbnail_url)
        .bind(&input.author)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create media"))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, kind: MediaKind, id: i64, input: MediaInput) -> Result<Option<Media>> {
        sqlx::query_as::<_, Media>(
            "UPDATE media
             SET title = ?, description = ?, url = ?, thumbnail_url = ?, author = ?, updated_at = ?
             WHERE id = ? AND kind = ?
             RETURNING id, kind, title, description, url, thumbnail_url, author, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.url)
        .bind(&input.thumbnail_url)
        .bind(&input.author)
        .bind(Utc::now())
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update media"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: MediaKind, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM media WHERE id = ? AND kind = ?")
            .bind(id)
            .bind(kind)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete media"))?;
        Ok(result.rows_affected() > 0)
    }
}
