//! Query resolvers. Reads are unrestricted except `users`.

use std::sync::Arc;

use async_graphql::{Context, Object};

use shophub_core::types::{ItemId, PageRequest};
use shophub_entity::item::ItemFilter;
use shophub_service::{ItemService, RequestContext, UserService};

use super::types::{
    AggregateItem, ItemConnection, ItemObject, ItemOrderByInput, ItemWhereInput,
    ItemWhereUniqueInput, UserObject, parse_id,
};
use crate::error::GraphQLResultExt;

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Items matching `where`, sorted by `orderBy`. `first` is capped at 100.
    async fn items(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<ItemWhereInput>,
        order_by: Option<ItemOrderByInput>,
        skip: Option<i32>,
        first: Option<i32>,
    ) -> async_graphql::Result<Vec<ItemObject>> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let filter = filter.map(ItemFilter::from).unwrap_or_default();
        let order = order_by.unwrap_or_default().into();

        let found = items
            .list_items(&filter, order, PageRequest::from_args(skip, first))
            .await
            .gql()?;
        Ok(found.into_iter().map(ItemObject).collect())
    }

    /// A single item, or `null`.
    async fn item(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: ItemWhereUniqueInput,
    ) -> async_graphql::Result<Option<ItemObject>> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let id: ItemId = parse_id(&filter.id)?;
        Ok(items.get_item(id).await.gql()?.map(ItemObject))
    }

    /// Aggregate over the items matching `where`.
    async fn items_connection(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<ItemWhereInput>,
    ) -> async_graphql::Result<ItemConnection> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let filter = filter.map(ItemFilter::from).unwrap_or_default();
        let count = items.count_items(&filter).await.gql()?;
        Ok(ItemConnection {
            aggregate: AggregateItem { count },
        })
    }

    /// The signed-in user, or `null`.
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<UserObject>> {
        let users = ctx.data::<Arc<UserService>>()?;
        let request = ctx.data::<RequestContext>()?;
        Ok(users.me(request).map(UserObject::entitled))
    }

    /// All users. Requires `ADMIN` or `PERMISSIONUPDATE`.
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<UserObject>> {
        let users = ctx.data::<Arc<UserService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let all = users.list_users(request).await.gql()?;
        Ok(all.into_iter().map(UserObject::entitled).collect())
    }
}
