//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use shophub_core::config::AppConfig;
use shophub_database::DatabasePool;
use shophub_service::AuthService;

use crate::schema::ShopSchema;
use crate::session::SessionCookie;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; `None` for the in-memory backend
    pub db_pool: Option<DatabasePool>,

    // ── Services ─────────────────────────────────────────────
    /// Resolves the session cookie into a request context
    pub auth_service: Arc<AuthService>,

    // ── GraphQL ──────────────────────────────────────────────
    /// Executable schema
    pub schema: ShopSchema,
    /// Session cookie settings
    pub session_cookie: SessionCookie,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.config.database.backend)
            .field("session_cookie", &self.session_cookie)
            .finish_non_exhaustive()
    }
}
