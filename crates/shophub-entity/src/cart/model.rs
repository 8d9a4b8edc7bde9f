//! Cart row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shophub_core::types::{CartItemId, ItemId, UserId};

/// One distinct item in a user's cart.
///
/// A user has at most one row per item; adding the same item again bumps
/// `quantity` instead of creating a second row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    /// Unique row identifier.
    pub id: CartItemId,
    /// Number of units, always at least 1.
    pub quantity: i32,
    /// Owner of the cart.
    pub user_id: UserId,
    /// The item in the cart.
    pub item_id: ItemId,
    /// When the item was first added.
    pub created_at: DateTime<Utc>,
}
