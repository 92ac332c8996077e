use crate::auth::{Admin, AdminRepository, AuthError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteAdminRepository {
    pool: SqlitePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for SqliteAdminRepository {
    #[instrument(skip(self, admin), fields(username = %admin.username))]
    async fn create(&self, admin: Admin) -> Result<Admin, AuthError> {
        let result = sqlx::query(
            "INSERT INTO admins (id, username, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&admin.id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(admin),
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => {
                Err(AuthError::AdminAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthError> {
        Ok(sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at, updated_at
             FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Admin>, AuthError> {
        Ok(sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at, updated_at
             FROM admins WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AuthError> {
        let result = sqlx::query("UPDATE admins SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::AdminNotFound);
        }
        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
