//! In-memory store implementing every repository trait.
//!
//! Used for `database.backend = "memory"` and by the test suites. All maps
//! live behind one shared [`Arc`], so clones of a [`MemoryStore`] observe
//! the same data.

mod cart_item;
mod item;
mod user;

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use shophub_core::types::{CartItemId, ItemId, UserId};
use shophub_entity::cart::CartItem;
use shophub_entity::item::Item;
use shophub_entity::user::User;

/// Shared, thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: DashMap<UserId, User>,
    /// Normalized e-mail -> user. Enforces e-mail uniqueness.
    user_emails: DashMap<String, UserId>,
    items: DashMap<ItemId, Item>,
    cart_items: DashMap<CartItemId, CartItem>,
    /// (user, item) -> cart row. Enforces one row per pair.
    cart_index: DashMap<(UserId, ItemId), CartItemId>,
    /// Last timestamp handed out, in microseconds.
    clock: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time, strictly increasing across calls so that records
    /// created back to back keep their insertion order.
    fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        let previous = self
            .inner
            .clock
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(wall.max(last + 1))
            })
            .unwrap_or(wall);
        let micros = wall.max(previous + 1);
        DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.inner.users.len()
    }

    /// Number of stored items.
    pub fn item_count(&self) -> usize {
        self.inner.items.len()
    }

    /// Number of stored cart rows across all users.
    pub fn cart_item_count(&self) -> usize {
        self.inner.cart_items.len()
    }
}
