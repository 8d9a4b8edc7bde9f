//! # shophub-database
//!
//! Repository interfaces for every ShopHub entity, their PostgreSQL
//! implementations, and an in-memory store used for local runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

use std::sync::Arc;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use traits::{CartItemRepository, ItemRepository, UserRepository};

use repositories::{PgCartItemRepository, PgItemRepository, PgUserRepository};

/// The set of repositories the services are constructed from.
#[derive(Clone)]
pub struct Repositories {
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Item store.
    pub items: Arc<dyn ItemRepository>,
    /// Cart store.
    pub cart_items: Arc<dyn CartItemRepository>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.pool().clone())),
            items: Arc::new(PgItemRepository::new(pool.pool().clone())),
            cart_items: Arc::new(PgCartItemRepository::new(pool.pool().clone())),
        }
    }

    /// Repositories sharing one fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Repositories over an existing in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            items: Arc::new(store.clone()),
            cart_items: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
