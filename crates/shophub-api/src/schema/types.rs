//! GraphQL object, input and enum types.

use std::str::FromStr;
use std::sync::Arc;

use async_graphql::{Context, Enum, ID, InputObject, Object, SimpleObject};
use chrono::{DateTime, Utc};

use shophub_core::error::AppError;
use shophub_entity::cart::CartItem;
use shophub_entity::item::{Item, ItemFilter, ItemOrder};
use shophub_entity::user::{Permission, PermissionSet, User};
use shophub_service::auth::SuccessMessage;
use shophub_service::{CartService, ItemService, RequestContext, UserService};

use crate::error::GraphQLResultExt;

/// Parse a GraphQL `ID` into a typed identifier.
pub fn parse_id<T: FromStr>(id: &ID) -> async_graphql::Result<T> {
    id.parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid id: {}", id.as_str())))
        .gql()
}

/// Capability tag.
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "Permission")]
pub enum PermissionGql {
    #[graphql(name = "ADMIN")]
    Admin,
    #[graphql(name = "USER")]
    User,
    #[graphql(name = "ITEMCREATE")]
    ItemCreate,
    #[graphql(name = "ITEMUPDATE")]
    ItemUpdate,
    #[graphql(name = "ITEMDELETE")]
    ItemDelete,
    #[graphql(name = "PERMISSIONUPDATE")]
    PermissionUpdate,
}

impl From<Permission> for PermissionGql {
    fn from(p: Permission) -> Self {
        match p {
            Permission::Admin => Self::Admin,
            Permission::User => Self::User,
            Permission::ItemCreate => Self::ItemCreate,
            Permission::ItemUpdate => Self::ItemUpdate,
            Permission::ItemDelete => Self::ItemDelete,
            Permission::PermissionUpdate => Self::PermissionUpdate,
        }
    }
}

impl From<PermissionGql> for Permission {
    fn from(p: PermissionGql) -> Self {
        match p {
            PermissionGql::Admin => Self::Admin,
            PermissionGql::User => Self::User,
            PermissionGql::ItemCreate => Self::ItemCreate,
            PermissionGql::ItemUpdate => Self::ItemUpdate,
            PermissionGql::ItemDelete => Self::ItemDelete,
            PermissionGql::PermissionUpdate => Self::PermissionUpdate,
        }
    }
}

/// Build a permission set from GraphQL enum values.
pub fn permission_set(permissions: &[PermissionGql]) -> PermissionSet {
    permissions.iter().map(|p| Permission::from(*p)).collect()
}

/// Sort order for `items`.
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[graphql(name = "ItemOrderByInput")]
pub enum ItemOrderByInput {
    #[graphql(name = "createdAt_ASC")]
    CreatedAtAsc,
    #[default]
    #[graphql(name = "createdAt_DESC")]
    CreatedAtDesc,
    #[graphql(name = "price_ASC")]
    PriceAsc,
    #[graphql(name = "price_DESC")]
    PriceDesc,
    #[graphql(name = "title_ASC")]
    TitleAsc,
    #[graphql(name = "title_DESC")]
    TitleDesc,
}

impl From<ItemOrderByInput> for ItemOrder {
    fn from(order: ItemOrderByInput) -> Self {
        match order {
            ItemOrderByInput::CreatedAtAsc => Self::CreatedAtAsc,
            ItemOrderByInput::CreatedAtDesc => Self::CreatedAtDesc,
            ItemOrderByInput::PriceAsc => Self::PriceAsc,
            ItemOrderByInput::PriceDesc => Self::PriceDesc,
            ItemOrderByInput::TitleAsc => Self::TitleAsc,
            ItemOrderByInput::TitleDesc => Self::TitleDesc,
        }
    }
}

/// Item search filter. Conditions are OR-combined and case-insensitive.
#[derive(InputObject, Debug, Clone, Default)]
pub struct ItemWhereInput {
    pub title_contains: Option<String>,
    pub description_contains: Option<String>,
}

impl From<ItemWhereInput> for ItemFilter {
    fn from(input: ItemWhereInput) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        Self {
            title_contains: non_empty(input.title_contains),
            description_contains: non_empty(input.description_contains),
        }
    }
}

/// Selects a single item.
#[derive(InputObject, Debug, Clone)]
pub struct ItemWhereUniqueInput {
    pub id: ID,
}

/// A plain acknowledgement.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "SuccessMessage")]
pub struct SuccessMessageObject {
    pub message: String,
}

impl From<SuccessMessage> for SuccessMessageObject {
    fn from(msg: SuccessMessage) -> Self {
        Self {
            message: msg.message,
        }
    }
}

/// `itemsConnection { aggregate { count } }`.
#[derive(SimpleObject, Debug, Clone)]
pub struct ItemConnection {
    pub aggregate: AggregateItem,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct AggregateItem {
    pub count: u64,
}

/// A registered user. Password and reset token are never exposed.
///
/// `email`, `permissions` and `cart` are private. A user reached through a
/// relation (`Item.user`, `CartItem.user`) only shows them to the user
/// themselves or to holders of `ADMIN`/`PERMISSIONUPDATE`.
pub struct UserObject {
    user: User,
    restricted: bool,
}

impl UserObject {
    /// A user the caller is already entitled to see in full: themselves,
    /// or the result of an operation that checked permissions.
    pub fn entitled(user: User) -> Self {
        Self {
            user,
            restricted: false,
        }
    }

    /// A user reached through a relation; private fields are checked
    /// against the caller.
    pub fn related(user: User) -> Self {
        Self {
            user,
            restricted: true,
        }
    }

    fn require_private(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        if !self.restricted {
            return Ok(());
        }
        let users = ctx.data::<Arc<UserService>>()?;
        let request = ctx.data::<RequestContext>()?;
        users.require_private_access(request, &self.user).gql()
    }
}

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID(self.user.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.user.name
    }

    async fn email(&self, ctx: &Context<'_>) -> async_graphql::Result<&str> {
        self.require_private(ctx)?;
        Ok(&self.user.email)
    }

    async fn permissions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PermissionGql>> {
        self.require_private(ctx)?;
        Ok(self.user.permissions.iter().map(PermissionGql::from).collect())
    }

    async fn cart(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<CartItemObject>> {
        self.require_private(ctx)?;
        let carts = ctx.data::<Arc<CartService>>()?;
        let rows = carts.cart_for(self.user.id).await.gql()?;
        Ok(rows.into_iter().map(CartItemObject).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.user.created_at
    }
}

/// A product listed in the shop.
pub struct ItemObject(pub Item);

#[Object(name = "Item")]
impl ItemObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn image(&self) -> Option<&str> {
        self.0.image.as_deref()
    }

    async fn large_image(&self) -> Option<&str> {
        self.0.large_image.as_deref()
    }

    /// Price in cents.
    async fn price(&self) -> i32 {
        self.0.price
    }

    async fn user(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<UserObject>> {
        let items = ctx.data::<Arc<ItemService>>()?;
        Ok(items.owner(&self.0).await.gql()?.map(UserObject::related))
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

/// One distinct item in a user's cart.
pub struct CartItemObject(pub CartItem);

#[Object(name = "CartItem")]
impl CartItemObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn quantity(&self) -> i32 {
        self.0.quantity
    }

    /// `null` if the item has since been deleted.
    async fn item(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<ItemObject>> {
        let carts = ctx.data::<Arc<CartService>>()?;
        Ok(carts.item_for(&self.0).await.gql()?.map(ItemObject))
    }

    async fn user(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<UserObject>> {
        let users = ctx.data::<Arc<UserService>>()?;
        Ok(users
            .find_user(self.0.user_id)
            .await
            .gql()?
            .map(UserObject::related))
    }
}
