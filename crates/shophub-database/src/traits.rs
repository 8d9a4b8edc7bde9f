//! Repository interfaces, one per entity.
//!
//! Services depend on these traits only. Every method performs at most one
//! logical write; there is no cross-call transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shophub_core::result::AppResult;
use shophub_core::types::{CartItemId, ItemId, PageRequest, UserId};
use shophub_entity::cart::CartItem;
use shophub_entity::item::{Item, ItemChanges, ItemFilter, ItemOrder, NewItem};
use shophub_entity::user::{NewUser, PermissionSet, User};

/// Persistence for [`User`] records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by e-mail. The address must already be normalized.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the user whose pending reset token equals `token` and whose
    /// expiry is at or after `valid_at`.
    async fn find_by_reset_token(
        &self,
        token: &str,
        valid_at: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a user. A duplicate e-mail is a validation error.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Store a pending reset token and its expiry.
    async fn set_reset_token(
        &self,
        id: UserId,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<User>;

    /// Replace the password hash and clear the reset token and its expiry
    /// in the same write, provided `token` is still pending for `id` and
    /// valid at `valid_at`. Returns `None` when the token was already
    /// consumed, replaced or expired.
    async fn complete_password_reset(
        &self,
        id: UserId,
        token: &str,
        valid_at: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>>;

    /// Overwrite the permission set wholesale.
    async fn update_permissions(&self, id: UserId, permissions: PermissionSet) -> AppResult<User>;
}

/// Persistence for [`Item`] records.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Find an item by primary key.
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// Items matching `filter`, sorted by `order`, windowed by `page`.
    async fn list(
        &self,
        filter: &ItemFilter,
        order: ItemOrder,
        page: PageRequest,
    ) -> AppResult<Vec<Item>>;

    /// Number of items matching `filter`.
    async fn count(&self, filter: &ItemFilter) -> AppResult<u64>;

    /// Insert an item.
    async fn create(&self, data: &NewItem) -> AppResult<Item>;

    /// Apply a partial update. Missing item is a not-found error.
    async fn update(&self, id: ItemId, changes: &ItemChanges) -> AppResult<Item>;

    /// Delete an item (and any cart rows referencing it), returning it.
    async fn delete(&self, id: ItemId) -> AppResult<Item>;
}

/// Persistence for [`CartItem`] rows.
#[async_trait]
pub trait CartItemRepository: Send + Sync + 'static {
    /// Find a cart row by primary key.
    async fn find_by_id(&self, id: CartItemId) -> AppResult<Option<CartItem>>;

    /// The user's cart, oldest row first.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<CartItem>>;

    /// Add one unit of `item_id` to the user's cart: insert a row with
    /// quantity 1, or increment the existing row for the pair. Atomic with
    /// respect to concurrent adds of the same pair. A missing item is a
    /// not-found error.
    async fn create(&self, user_id: UserId, item_id: ItemId) -> AppResult<CartItem>;

    /// Delete a row, returning it.
    async fn delete(&self, id: CartItemId) -> AppResult<CartItem>;
}
