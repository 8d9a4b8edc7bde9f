//! Item entity model, update payloads and list filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shophub_core::types::{ItemId, UserId};

/// A product listed in the shop.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Short title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Thumbnail image URL.
    pub image: Option<String>,
    /// Full-size image URL.
    pub large_image: Option<String>,
    /// Price in cents.
    pub price: i32,
    /// The user who listed the item. Set at creation, never changed.
    pub user_id: UserId,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether `user_id` owns this item.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to create an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub large_image: Option<String>,
    pub price: i32,
    pub user_id: UserId,
}

/// Partial update of an item. `None` leaves the column untouched; the id
/// and owner are never part of the payload.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub large_image: Option<String>,
    pub price: Option<i32>,
}

impl ItemChanges {
    /// Whether the payload changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.large_image.is_none()
            && self.price.is_none()
    }

    /// Apply the payload to an in-memory item.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(image) = &self.image {
            item.image = Some(image.clone());
        }
        if let Some(large_image) = &self.large_image {
            item.large_image = Some(large_image.clone());
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }
}

/// Search filter for item listings.
///
/// Conditions are case-insensitive substring matches combined with OR;
/// a filter with no conditions matches every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub title_contains: Option<String>,
    pub description_contains: Option<String>,
}

impl ItemFilter {
    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.title_contains.is_none() && self.description_contains.is_none()
    }

    /// Evaluate the filter against an item.
    pub fn matches(&self, item: &Item) -> bool {
        if self.is_empty() {
            return true;
        }
        let contains = |haystack: &str, needle: &Option<String>| {
            needle
                .as_deref()
                .is_some_and(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
        };
        contains(&item.title, &self.title_contains)
            || contains(&item.description, &self.description_contains)
    }
}

/// Sort order for item listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemOrder {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}
