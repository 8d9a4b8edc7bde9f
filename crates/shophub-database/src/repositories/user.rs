//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_core::types::UserId;
use shophub_entity::user::{NewUser, PermissionSet, User};

use crate::traits::UserRepository;

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        valid_at: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE reset_token = $1 AND reset_token_expiry >= $2 LIMIT 1",
        )
        .bind(token)
        .bind(valid_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by reset token", e)
        })
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, permissions) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::validation(format!("A user with email {} already exists", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn set_reset_token(
        &self,
        id: UserId,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET reset_token = $2, reset_token_expiry = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(token)
        .bind(expiry)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store reset token", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn complete_password_reset(
        &self,
        id: UserId,
        token: &str,
        valid_at: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET password_hash = $2, reset_token = NULL, reset_token_expiry = NULL, \
                              updated_at = NOW() \
             WHERE id = $1 AND reset_token = $3 AND reset_token_expiry >= $4 RETURNING *",
        )
        .bind(id)
        .bind(password_hash)
        .bind(token)
        .bind(valid_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset password", e))
    }

    async fn update_permissions(&self, id: UserId, permissions: PermissionSet) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET permissions = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(permissions)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update permissions", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
