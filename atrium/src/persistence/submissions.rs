use super::{db_error, total};
use crate::content::{
    PageRequest, Submission, SubmissionFilter, SubmissionInput, SubmissionKind, SubmissionStatus,
};
use crate::ports::SubmissionRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteSubmissionRepository {
    pool: SqlitePool,
}

impl SqliteSubmissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &SubmissionFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<Submission>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, Submission>(
            "SELECT id, kind, name, email, phone, organization, message, amount, status, created_at, updated_at
             FROM submissions
             WHERE (?1 IS NULL OR kind = ?1) AND (?2 IS NULL OR status = ?2)
             ORDER BY created_at DESC, id DESC
             LIMIT ?3 OFFSET ?4",
        )
        .bind(filter.kind)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list submissions"))?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM submissions
             WHERE (?1 IS NULL OR kind = ?1) AND (?2 IS NULL OR status = ?2)",
        )
        .bind(filter.kind)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count submissions"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<Submission>> {
        sqlx::query_as::<_, Submission>(
            "SELECT id, kind, name, email, phone, organization, message, amount, status, created_at, updated_at
             FROM submissions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch submission"))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, kind: SubmissionKind, input: SubmissionInput) -> Result<Submission> {
        let now = Utc::now();
        sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (kind, name, email, phone, organization, message, amount, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, kind, name, email, phone, organization, message, amount, status, created_at, updated_at",
        )
        .bind(kind)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.organization)
        .bind(&input.message)
        .bind(input.amount)
        .bind(SubmissionStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create submission"))
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<Option<Submission>> {
        sqlx::query_as::<_, Submission>(
            "UPDATE submissions SET status = ?, updated_at = ? WHERE id = ?
             RETURNING id, kind, name, email, phone, organization, message, amount, status, created_at, updated_at",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update submission status"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete submission"))?;
        Ok(result.rows_affected() > 0)
    }
}
