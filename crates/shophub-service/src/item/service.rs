//! Item service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

use shophub_auth::guard::PermissionGuard;
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::{ItemId, PageRequest};
use shophub_database::{ItemRepository, UserRepository};
use shophub_entity::item::{Item, ItemChanges, ItemFilter, ItemOrder, NewItem};
use shophub_entity::user::{Permission, User};

use crate::context::RequestContext;

/// Permissions that allow editing someone else's item.
const UPDATE_ANY: [Permission; 2] = [Permission::Admin, Permission::ItemUpdate];
/// Permissions that allow deleting someone else's item.
const DELETE_ANY: [Permission; 2] = [Permission::Admin, Permission::ItemDelete];

/// Item creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    /// Title.
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    /// Description.
    pub description: String,
    /// Thumbnail URL.
    pub image: Option<String>,
    /// Full-size image URL.
    pub large_image: Option<String>,
    /// Price in cents.
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i32,
}

/// Titles must contain something other than whitespace.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title").with_message("Title is required".into()));
    }
    Ok(())
}

/// Handles the item catalogue.
#[derive(Clone)]
pub struct ItemService {
    /// Item repository.
    items: Arc<dyn ItemRepository>,
    /// User repository, for owner lookups.
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService").finish_non_exhaustive()
    }
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(items: Arc<dyn ItemRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { items, users }
    }

    /// Lists items matching `filter`.
    pub async fn list_items(
        &self,
        filter: &ItemFilter,
        order: ItemOrder,
        page: PageRequest,
    ) -> AppResult<Vec<Item>> {
        self.items.list(filter, order, page).await
    }

    /// Counts items matching `filter`.
    pub async fn count_items(&self, filter: &ItemFilter) -> AppResult<u64> {
        self.items.count(filter).await
    }

    /// Gets one item, or `None`.
    pub async fn get_item(&self, id: ItemId) -> AppResult<Option<Item>> {
        self.items.find_by_id(id).await
    }

    /// The user who listed `item`.
    pub async fn owner(&self, item: &Item) -> AppResult<Option<User>> {
        self.users.find_by_id(item.user_id).await
    }

    /// Creates an item owned by the caller.
    pub async fn create_item(&self, ctx: &RequestContext, req: CreateItemRequest) -> AppResult<Item> {
        let user = ctx.require_user()?;
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid item: {e}")))?;

        let item = self
            .items
            .create(&NewItem {
                title: req.title,
                description: req.description,
                image: req.image,
                large_image: req.large_image,
                price: req.price,
                user_id: user.id,
            })
            .await?;

        info!(item_id = %item.id, user_id = %user.id, "Item created");
        Ok(item)
    }

    /// Applies a partial update. The caller must own the item or hold
    /// `ADMIN`/`ITEMUPDATE`.
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: ItemId,
        changes: ItemChanges,
    ) -> AppResult<Item> {
        let user = ctx.require_user()?;
        let item = self.load(id).await?;
        if !item.is_owned_by(user.id) {
            PermissionGuard::require_any_permission(&user.permissions, &UPDATE_ANY)?;
        }

        if changes.price.is_some_and(|p| p < 0) {
            return Err(AppError::validation("Price must not be negative"));
        }
        if let Some(title) = changes.title.as_deref() {
            validate_title(title).map_err(|_| AppError::validation("Title is required"))?;
        }
        if changes.is_empty() {
            return Ok(item);
        }

        let item = self.items.update(id, &changes).await?;
        info!(item_id = %item.id, user_id = %user.id, "Item updated");
        Ok(item)
    }

    /// Deletes an item. The caller must own it or hold `ADMIN`/`ITEMDELETE`.
    pub async fn delete_item(&self, ctx: &RequestContext, id: ItemId) -> AppResult<Item> {
        let user = ctx.require_user()?;
        let item = self.load(id).await?;
        if !item.is_owned_by(user.id) {
            PermissionGuard::require_any_permission(&user.permissions, &DELETE_ANY)?;
        }

        let item = self.items.delete(id).await?;
        info!(item_id = %item.id, user_id = %user.id, "Item deleted");
        Ok(item)
    }

    async fn load(&self, id: ItemId) -> AppResult<Item> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No item found with id {id}")))
    }
}
