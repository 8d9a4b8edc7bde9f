//! Cart repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_core::types::{CartItemId, ItemId, UserId};
use shophub_entity::cart::CartItem;

use crate::traits::CartItemRepository;

/// PostgreSQL-backed [`CartItemRepository`].
#[derive(Debug, Clone)]
pub struct PgCartItemRepository {
    pool: PgPool,
}

impl PgCartItemRepository {
    /// Create a new cart repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartItemRepository for PgCartItemRepository {
    async fn find_by_id(&self, id: CartItemId) -> AppResult<Option<CartItem>> {
        sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cart item", e))
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<CartItem>> {
        sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cart", e))
    }

    async fn create(&self, user_id: UserId, item_id: ItemId) -> AppResult<CartItem> {
        sqlx::query_as::<_, CartItem>(
            "INSERT INTO cart_items (id, quantity, user_id, item_id) VALUES ($1, 1, $2, $3) \
             ON CONFLICT (user_id, item_id) \
             DO UPDATE SET quantity = cart_items.quantity + 1 \
             RETURNING *",
        )
        .bind(CartItemId::new())
        .bind(user_id)
        .bind(item_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Item {item_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add to cart", e),
        })
    }

    async fn delete(&self, id: CartItemId) -> AppResult<CartItem> {
        sqlx::query_as::<_, CartItem>("DELETE FROM cart_items WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove cart item", e))?
            .ok_or_else(|| AppError::not_found(format!("Cart item {id} not found")))
    }
}
