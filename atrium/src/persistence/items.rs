use super::{db_error, total};
use crate::content::{Item, ItemFilter, ItemInput, PageRequest};
use crate::ports::ItemRepository;
use async_trait::async_trait;
use chrono::Utc;
use shared::Result;
use sqlx::SqlitePool;
use tracing::instrument;

#[derive(Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &ItemFilter, page: Option<PageRequest>) -> Result<(Vec<Item>, u64)> {
        let (limit, offset) = PageRequest::sql_bounds(page);

        let rows = sqlx::query_as::<_, Item>(
            "SELECT id, title, description, category, image_url, created_at, updated_at
             FROM items
             WHERE (?1 IS NULL OR category = ?1)
             ORDER BY created_at DESC, id DESC
             LIMIT ?2 OFFSET ?3",
        )
        .bind(filter.category.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list items"))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE (?1 IS NULL OR category = ?1)")
                .bind(filter.category.as_deref())
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count items"))?;

        Ok((rows, total(count)))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT id, title, description, category, image_url, created_at, updated_at
             FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch item"))
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: ItemInput) -> Result<Item> {
        let now = Utc::now();
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (title, description, category, image_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, title, description, category, image_url, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create item"))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: ItemInput) -> Result<Option<Item>> {
        sqlx::query_as::<_, Item>(
            "UPDATE items
             SET title = ?, description = ?, category = ?, image_url = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, title, description, category, image_url, created_at, updated_at",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update item"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete item"))?;
        Ok(result.rows_affected() > 0)
    }
}
