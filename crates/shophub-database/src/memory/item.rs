use std::cmp::Ordering;

use async_trait::async_trait;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::{ItemId, PageRequest};
use shophub_entity::item::{Item, ItemChanges, ItemFilter, ItemOrder, NewItem};

use super::MemoryStore;
use crate::traits::ItemRepository;

fn compare(order: ItemOrder, a: &Item, b: &Item) -> Ordering {
    let primary = match order {
        ItemOrder::CreatedAtAsc => a.created_at.cmp(&b.created_at),
        ItemOrder::CreatedAtDesc => b.created_at.cmp(&a.created_at),
        ItemOrder::PriceAsc => a.price.cmp(&b.price),
        ItemOrder::PriceDesc => b.price.cmp(&a.price),
        ItemOrder::TitleAsc => a.title.cmp(&b.title),
        ItemOrder::TitleDesc => b.title.cmp(&a.title),
    };
    primary.then_with(|| a.created_at.cmp(&b.created_at))
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        Ok(self.inner.items.get(&id).map(|i| i.clone()))
    }

    async fn list(
        &self,
        filter: &ItemFilter,
        order: ItemOrder,
        page: PageRequest,
    ) -> AppResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .inner
            .items
            .iter()
            .filter(|i| filter.matches(i))
            .map(|i| i.clone())
            .collect();
        items.sort_by(|a, b| compare(order, a, b));

        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count(&self, filter: &ItemFilter) -> AppResult<u64> {
        Ok(self.inner.items.iter().filter(|i| filter.matches(i)).count() as u64)
    }

    async fn create(&self, data: &NewItem) -> AppResult<Item> {
        if !self.inner.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!("User {} not found", data.user_id)));
        }

        let now = self.now();
        let item = Item {
            id: ItemId::new(),
            title: data.title.clone(),
            description: data.description.clone(),
            image: data.image.clone(),
            large_image: data.large_image.clone(),
            price: data.price,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        self.inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, changes: &ItemChanges) -> AppResult<Item> {
        let now = self.now();
        let mut item = self
            .inner
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        changes.apply_to(&mut item);
        item.updated_at = now;
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId) -> AppResult<Item> {
        let (_, item) = self
            .inner
            .items
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        let orphaned: Vec<_> = self
            .inner
            .cart_items
            .iter()
            .filter(|row| row.item_id == id)
            .map(|row| (row.id, row.user_id))
            .collect();
        for (row_id, user_id) in orphaned {
            self.inner.cart_items.remove(&row_id);
            self.inner.cart_index.remove(&(user_id, id));
        }

        Ok(item)
    }
}
