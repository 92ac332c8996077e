use super::{db_error, total};
use crate::content::{EducationEntry, EducationInput, PageRequest};
use crate::ports::EducationRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteEducationRepository {
    pool: SqlitePool,
}

impl SqliteEducationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EducationRepository for SqliteEducationRepository {
    #[instrument(skip(self))]
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<EducationEntry>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, EducationEntry>(
            "SELECT id, title, description, category, content, image_url, created_at, updated_at
             FROM education
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list education entries"))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM education")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count education entries"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<EducationEntry>> {
        sqlx::query_as::<_, EducationEntry>(
            "SELECT id, title, description, category, content, image_url, created_at, updated_at
             FROM education WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch education entry"))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: EducationInput) -> Result<EducationEntry> {
        let now = Utc::now();
        sqlx::query_as::<_, EducationEntry>(
            "INSERT INTO education (title, description, category, content, image_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id, title, description, category, content, image_url, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create education entry"))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: EducationInput) -> Result<Option<EducationEntry>> {
        sqlx::query_as::<_, EducationEntry>(
            "UPDATE education
             SET title = ?, description = ?, category = ?, content = ?, image_url = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, title, description, category, content, image_url, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update education entry"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM education WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete education entry"))?;
        Ok(result.rows_affected() > 0)
    }
}
