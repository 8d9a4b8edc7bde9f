use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::{CartItemId, ItemId, UserId};
use shophub_entity::cart::CartItem;

use super::MemoryStore;
use crate::traits::CartItemRepository;

#[async_trait]
impl CartItemRepository for MemoryStore {
    async fn find_by_id(&self, id: CartItemId) -> AppResult<Option<CartItem>> {
        Ok(self.inner.cart_items.get(&id).map(|row| row.clone()))
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<CartItem>> {
        let mut rows: Vec<CartItem> = self
            .inner
            .cart_items
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.clone())
            .collect();
        rows.sort_by_key(|row| row.created_at);
        Ok(rows)
    }

    async fn create(&self, user_id: UserId, item_id: ItemId) -> AppResult<CartItem> {
        // The index entry stays locked until the row is written, so two
        // concurrent adds for the same pair serialize here.
        match self.inner.cart_index.entry((user_id, item_id)) {
            Entry::Occupied(slot) => {
                let mut row = self
                    .inner
                    .cart_items
                    .get_mut(slot.get())
                    .ok_or_else(|| AppError::internal("Cart index points at a missing row"))?;
                row.quantity += 1;
                Ok(row.clone())
            }
            Entry::Vacant(slot) => {
                if !self.inner.items.contains_key(&item_id) {
                    return Err(AppError::not_found(format!("Item {item_id} not found")));
                }
                let row = CartItem {
                    id: CartItemId::new(),
                    quantity: 1,
                    user_id,
                    item_id,
                    created_at: self.now(),
                };
                self.inner.cart_items.insert(row.id, row.clone());
                slot.insert(row.id);
                Ok(row)
            }
        }
    }

    async fn delete(&self, id: CartItemId) -> AppResult<CartItem> {
        let (_, row) = self
            .inner
            .cart_items
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Cart item {id} not found")))?;
        self.inner.cart_index.remove(&(row.user_id, row.item_id));
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shophub_entity::item::NewItem;
    use shophub_entity::user::{NewUser, PermissionSet};

    use super::*;
    use crate::traits::{ItemRepository, UserRepository};

    async fn seed(store: &MemoryStore) -> (UserId, ItemId) {
        let user = UserRepository::create(
            store,
            &NewUser {
                name: "Wes".to_string(),
                email: "wes@example.com".to_string(),
                password_hash: "hash".to_string(),
                permissions: PermissionSet::new_user(),
            },
        )
        .await
        .unwrap();
        let item = ItemRepository::create(
            store,
            &NewItem {
                title: "Hat".to_string(),
                description: "cap".to_string(),
                image: None,
                large_image: None,
                price: 1000,
                user_id: user.id,
            },
        )
        .await
        .unwrap();
        (user.id, item.id)
    }

    #[tokio::test]
    async fn test_create_twice_increments() {
        let store = MemoryStore::new();
        let (user_id, item_id) = seed(&store).await;

        let first = CartItemRepository::create(&store, user_id, item_id).await.unwrap();
        let second = CartItemRepository::create(&store, user_id, item_id).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 2);
        assert_eq!(store.list_for_user(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_for_missing_item_is_not_found() {
        let store = MemoryStore::new();
        let (user_id, _) = seed(&store).await;
        let err = CartItemRepository::create(&store, user_id, ItemId::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_one_row() {
        let store = Arc::new(MemoryStore::new());
        let (user_id, item_id) = seed(&store).await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    CartItemRepository::create(store.as_ref(), user_id, item_id).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let rows = store.list_for_user(user_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 16);
    }

    #[tokio::test]
    async fn test_delete_frees_the_pair() {
        let store = MemoryStore::new();
        let (user_id, item_id) = seed(&store).await;
        let row = CartItemRepository::create(&store, user_id, item_id).await.unwrap();

        CartItemRepository::delete(&store, row.id).await.unwrap();
        assert!(store.list_for_user(user_id).await.unwrap().is_empty());

        let fresh = CartItemRepository::create(&store, user_id, item_id).await.unwrap();
        assert_eq!(fresh.quantity, 1);
        assert_ne!(fresh.id, row.id);
    }
}
