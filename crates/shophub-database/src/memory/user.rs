use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_core::types::UserId;
use shophub_entity::user::{NewUser, PermissionSet, User};

use super::MemoryStore;
use crate::traits::UserRepository;

impl MemoryStore {
    fn modify_user(&self, id: UserId, f: impl FnOnce(&mut User)) -> AppResult<User> {
        let now = self.now();
        let mut user = self
            .inner
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        f(user.value_mut());
        user.updated_at = now;
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.inner.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.inner.user_emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.inner.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        valid_at: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .users
            .iter()
            .find(|u| u.reset_token_valid_at(token, valid_at))
            .map(|u| u.clone()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.inner.users.iter().map(|u| u.clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        match self.inner.user_emails.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(AppError::validation(format!(
                "A user with email {} already exists",
                data.email
            ))),
            Entry::Vacant(slot) => {
                let now = self.now();
                let user = User {
                    id: UserId::new(),
                    name: data.name.clone(),
                    email: data.email.clone(),
                    password_hash: data.password_hash.clone(),
                    permissions: data.permissions,
                    reset_token: None,
                    reset_token_expiry: None,
                    created_at: now,
                    updated_at: now,
                };
                self.inner.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn set_reset_token(
        &self,
        id: UserId,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<User> {
        self.modify_user(id, |user| {
            user.reset_token = Some(token.to_string());
            user.reset_token_expiry = Some(expiry);
        })
    }

    async fn complete_password_reset(
        &self,
        id: UserId,
        token: &str,
        valid_at: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let now = self.now();
        let Some(mut user) = self.inner.users.get_mut(&id) else {
            return Ok(None);
        };
        // The shard lock is held across check and write.
        if !user.reset_token_valid_at(token, valid_at) {
            return Ok(None);
        }
        user.password_hash = password_hash.to_string();
        user.reset_token = None;
        user.reset_token_expiry = None;
        user.updated_at = now;
        Ok(Some(user.clone()))
    }

    async fn update_permissions(&self, id: UserId, permissions: PermissionSet) -> AppResult<User> {
        self.modify_user(id, |user| user.permissions = permissions)
    }
}
