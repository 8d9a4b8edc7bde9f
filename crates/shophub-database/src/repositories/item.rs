//! Item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_core::types::{ItemId, PageRequest};
use shophub_entity::item::{Item, ItemChanges, ItemFilter, ItemOrder, NewItem};

use crate::traits::ItemRepository;

/// Matches every row when both patterns are NULL, otherwise OR-combines the
/// provided ILIKE conditions.
const FILTER_CLAUSE: &str = "(($1::text IS NULL AND $2::text IS NULL) \
     OR ($1::text IS NOT NULL AND title ILIKE $1) \
     OR ($2::text IS NOT NULL AND description ILIKE $2))";

/// PostgreSQL-backed [`ItemRepository`].
#[derive(Debug, Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        order: ItemOrder,
        page: PageRequest,
    ) -> AppResult<Vec<Item>> {
        let sql = format!(
            "SELECT * FROM items WHERE {FILTER_CLAUSE} ORDER BY {} LIMIT $3 OFFSET $4",
            order_clause(order)
        );

        sqlx::query_as::<_, Item>(&sql)
            .bind(filter.title_contains.as_deref().map(like_pattern))
            .bind(filter.description_contains.as_deref().map(like_pattern))
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
    }

    async fn count(&self, filter: &ItemFilter) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM items WHERE {FILTER_CLAUSE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.title_contains.as_deref().map(like_pattern))
            .bind(filter.description_contains.as_deref().map(like_pattern))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))?;

        Ok(count as u64)
    }

    async fn create(&self, data: &NewItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, title, description, image, large_image, price, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(ItemId::new())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image)
        .bind(&data.large_image)
        .bind(data.price)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("User {} not found", data.user_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create item", e),
        })
    }

    async fn update(&self, id: ItemId, changes: &ItemChanges) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items SET title = COALESCE($2, title), \
                              description = COALESCE($3, description), \
                              image = COALESCE($4, image), \
                              large_image = COALESCE($5, large_image), \
                              price = COALESCE($6, price), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.image)
        .bind(&changes.large_image)
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn delete(&self, id: ItemId) -> AppResult<Item> {
        // cart_items rows go with it via ON DELETE CASCADE
        sqlx::query_as::<_, Item>("DELETE FROM items WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }
}

fn order_clause(order: ItemOrder) -> &'static str {
    match order {
        ItemOrder::CreatedAtAsc => "created_at ASC, id ASC",
        ItemOrder::CreatedAtDesc => "created_at DESC, id DESC",
        ItemOrder::PriceAsc => "price ASC, id ASC",
        ItemOrder::PriceDesc => "price DESC, id DESC",
        ItemOrder::TitleAsc => "title ASC, id ASC",
        ItemOrder::TitleDesc => "title DESC, id DESC",
    }
}

/// Wrap a search term for ILIKE, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
