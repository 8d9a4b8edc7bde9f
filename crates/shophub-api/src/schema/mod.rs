//! GraphQL schema.

pub mod mutation;
pub mod query;
pub mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use shophub_service::{AuthService, CartService, ItemService, UserService};

use crate::session::SessionCookie;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The executable ShopHub schema.
pub type ShopSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Nesting limit for incoming queries (item -> user -> cart -> item ...).
const MAX_QUERY_DEPTH: usize = 12;

/// Build the schema with every service available to resolvers.
pub fn build_schema(
    auth: Arc<AuthService>,
    items: Arc<ItemService>,
    carts: Arc<CartService>,
    users: Arc<UserService>,
    cookie: SessionCookie,
) -> ShopSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(items)
        .data(carts)
        .data(users)
        .data(cookie)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}
