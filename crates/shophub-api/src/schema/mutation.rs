//! Mutation resolvers.
//!
//! Each resolver delegates to one service call. Session-issuing mutations
//! also set the `token` cookie on the HTTP response.

use std::sync::Arc;

use async_graphql::{Context, ID, Object};
use axum::http::header::SET_COOKIE;

use shophub_core::types::{CartItemId, ItemId, UserId};
use shophub_entity::item::ItemChanges;
use shophub_service::auth::AuthSession;
use shophub_service::{
    AuthService, CartService, CreateItemRequest, ItemService, RequestContext,
    ResetPasswordRequest, SignupRequest, UserService,
};

use super::types::{
    CartItemObject, ItemObject, PermissionGql, SuccessMessageObject, UserObject, parse_id,
    permission_set,
};
use crate::error::GraphQLResultExt;
use crate::session::SessionCookie;

#[derive(Debug, Default)]
pub struct MutationRoot;

/// Attach the session cookie to the response and return the user.
fn start_session(ctx: &Context<'_>, session: AuthSession) -> async_graphql::Result<UserObject> {
    let cookie = ctx.data::<SessionCookie>()?;
    ctx.append_http_header(SET_COOKIE, cookie.set(&session.token));
    Ok(UserObject::entitled(session.user))
}

#[Object]
impl MutationRoot {
    /// List a new item owned by the caller.
    async fn create_item(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: String,
        price: i32,
        image: Option<String>,
        large_image: Option<String>,
    ) -> async_graphql::Result<ItemObject> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let item = items
            .create_item(
                request,
                CreateItemRequest {
                    title,
                    description,
                    image,
                    large_image,
                    price,
                },
            )
            .await
            .gql()?;
        Ok(ItemObject(item))
    }

    /// Partially update an item. Omitted fields are left unchanged.
    async fn update_item(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        description: Option<String>,
        price: Option<i32>,
        image: Option<String>,
        large_image: Option<String>,
    ) -> async_graphql::Result<ItemObject> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let id: ItemId = parse_id(&id)?;
        let changes = ItemChanges {
            title,
            description,
            image,
            large_image,
            price,
        };
        Ok(ItemObject(items.update_item(request, id, changes).await.gql()?))
    }

    /// Delete an item the caller owns, or any item with `ADMIN`/`ITEMDELETE`.
    async fn delete_item(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ItemObject> {
        let items = ctx.data::<Arc<ItemService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let id: ItemId = parse_id(&id)?;
        Ok(ItemObject(items.delete_item(request, id).await.gql()?))
    }

    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> async_graphql::Result<UserObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let session = auth
            .signup(SignupRequest {
                email,
                name,
                password,
            })
            .await
            .gql()?;
        start_session(ctx, session)
    }

    async fn signin(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> async_graphql::Result<UserObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let session = auth.signin(&email, &password).await.gql()?;
        start_session(ctx, session)
    }

    async fn signout(&self, ctx: &Context<'_>) -> async_graphql::Result<SuccessMessageObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let cookie = ctx.data::<SessionCookie>()?;
        ctx.append_http_header(SET_COOKIE, cookie.clear());
        Ok(auth.signout().into())
    }

    /// Mail a password reset link to `email`.
    async fn request_reset(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> async_graphql::Result<SuccessMessageObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        Ok(auth.request_password_reset(&email).await.gql()?.into())
    }

    async fn reset_password(
        &self,
        ctx: &Context<'_>,
        reset_token: String,
        password: String,
        confirm_password: String,
    ) -> async_graphql::Result<UserObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let session = auth
            .reset_password(ResetPasswordRequest {
                reset_token,
                password,
                confirm_password,
            })
            .await
            .gql()?;
        start_session(ctx, session)
    }

    /// Replace a user's permissions. Requires `ADMIN` or `PERMISSIONUPDATE`.
    async fn update_permissions(
        &self,
        ctx: &Context<'_>,
        permissions: Vec<PermissionGql>,
        user_id: ID,
    ) -> async_graphql::Result<UserObject> {
        let users = ctx.data::<Arc<UserService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let user_id: UserId = parse_id(&user_id)?;
        let user = users
            .update_permissions(request, user_id, permission_set(&permissions))
            .await
            .gql()?;
        Ok(UserObject::entitled(user))
    }

    /// Add one unit of an item to the caller's cart.
    async fn add_to_cart(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<CartItemObject> {
        let carts = ctx.data::<Arc<CartService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let item_id: ItemId = parse_id(&id)?;
        Ok(CartItemObject(carts.add_to_cart(request, item_id).await.gql()?))
    }

    /// Remove a row from the caller's cart.
    async fn remove_from_cart(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<CartItemObject> {
        let carts = ctx.data::<Arc<CartService>>()?;
        let request = ctx.data::<RequestContext>()?;
        let id: CartItemId = parse_id(&id)?;
        Ok(CartItemObject(carts.remove_from_cart(request, id).await.gql()?))
    }
}
