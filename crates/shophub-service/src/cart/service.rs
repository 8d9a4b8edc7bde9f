//! Cart service.

use std::sync::Arc;

use tracing::info;

use shophub_auth::guard::PERMISSION_DENIED;
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::{CartItemId, ItemId, UserId};
use shophub_database::{CartItemRepository, ItemRepository};
use shophub_entity::cart::CartItem;
use shophub_entity::item::Item;

use crate::context::RequestContext;

/// Handles adding to and removing from carts.
#[derive(Clone)]
pub struct CartService {
    /// Cart repository.
    cart_items: Arc<dyn CartItemRepository>,
    /// Item repository, for existence checks and relations.
    items: Arc<dyn ItemRepository>,
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService").finish_non_exhaustive()
    }
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(cart_items: Arc<dyn CartItemRepository>, items: Arc<dyn ItemRepository>) -> Self {
        Self { cart_items, items }
    }

    /// Adds one unit of an item to the caller's cart.
    pub async fn add_to_cart(&self, ctx: &RequestContext, item_id: ItemId) -> AppResult<CartItem> {
        let user = ctx.require_user()?;
        if self.items.find_by_id(item_id).await?.is_none() {
            return Err(AppError::not_found(format!("No item found with id {item_id}")));
        }

        let row = self.cart_items.create(user.id, item_id).await?;
        info!(
            cart_item_id = %row.id,
            user_id = %user.id,
            item_id = %item_id,
            quantity = row.quantity,
            "Added to cart"
        );
        Ok(row)
    }

    /// Removes a row from the caller's cart.
    pub async fn remove_from_cart(
        &self,
        ctx: &RequestContext,
        id: CartItemId,
    ) -> AppResult<CartItem> {
        let user = ctx.require_user()?;
        let row = self
            .cart_items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No cart item found with id {id}")))?;
        if row.user_id != user.id {
            return Err(AppError::authorization(PERMISSION_DENIED));
        }

        let row = self.cart_items.delete(id).await?;
        info!(cart_item_id = %row.id, user_id = %user.id, "Removed from cart");
        Ok(row)
    }

    /// The cart of `user_id`, oldest row first.
    pub async fn cart_for(&self, user_id: UserId) -> AppResult<Vec<CartItem>> {
        self.cart_items.list_for_user(user_id).await
    }

    /// The item a cart row refers to.
    pub async fn item_for(&self, row: &CartItem) -> AppResult<Option<Item>> {
        self.items.find_by_id(row.item_id).await
    }
}
