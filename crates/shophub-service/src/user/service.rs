//! User service.

use std::sync::Arc;

use tracing::info;

use shophub_auth::guard::PermissionGuard;
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::UserId;
use shophub_database::UserRepository;
use shophub_entity::user::{Permission, PermissionSet, User, normalize_email};

use crate::context::RequestContext;

/// Permissions that allow listing users and changing their permissions.
const MANAGE_PERMISSIONS: [Permission; 2] = [Permission::Admin, Permission::PermissionUpdate];

/// Handles user lookups and permission changes.
#[derive(Clone)]
pub struct UserService {
    /// User repository.
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// The signed-in user, or `None` when anonymous.
    pub fn me(&self, ctx: &RequestContext) -> Option<User> {
        ctx.user().cloned()
    }

    /// Looks up a user by id.
    pub async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// Checks that the caller may read `user`'s e-mail, permissions and cart:
    /// the user themselves, or a holder of `ADMIN`/`PERMISSIONUPDATE`.
    pub fn require_private_access(&self, ctx: &RequestContext, user: &User) -> AppResult<()> {
        let viewer = ctx.require_user()?;
        if viewer.id == user.id {
            return Ok(());
        }
        PermissionGuard::require_any_permission(&viewer.permissions, &MANAGE_PERMISSIONS)
    }

    /// Lists all users. Requires `ADMIN` or `PERMISSIONUPDATE`.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        let user = ctx.require_user()?;
        PermissionGuard::require_any_permission(&user.permissions, &MANAGE_PERMISSIONS)?;
        self.users.list().await
    }

    /// Overwrites a user's permission set. Requires `ADMIN` or
    /// `PERMISSIONUPDATE`.
    pub async fn update_permissions(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        permissions: PermissionSet,
    ) -> AppResult<User> {
        let actor = ctx.require_user()?;
        PermissionGuard::require_any_permission(&actor.permissions, &MANAGE_PERMISSIONS)?;

        let user = self.users.update_permissions(user_id, permissions).await?;
        info!(
            actor_id = %actor.id,
            user_id = %user.id,
            permissions = %user.permissions,
            "Permissions updated"
        );
        Ok(user)
    }

    /// Overwrites the permission set of the user with `email` without a
    /// session. Used by the operator CLI to bootstrap the first admin.
    pub async fn grant_permissions(
        &self,
        email: &str,
        permissions: PermissionSet,
    ) -> AppResult<User> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No such user found for email {email}")))?;

        let user = self.users.update_permissions(user.id, permissions).await?;
        info!(user_id = %user.id, permissions = %user.permissions, "Permissions granted");
        Ok(user)
    }
}
