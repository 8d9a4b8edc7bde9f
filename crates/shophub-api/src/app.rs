//! Application builder: wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use shophub_core::config::{AppConfig, DatabaseBackend};
use shophub_core::error::{AppError, ErrorKind};
use shophub_database::{DatabasePool, Repositories, migration};
use shophub_service::mail::{Mailer, build_mailer};
use shophub_service::{AuthService, CartService, ItemService, UserService};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::schema::build_schema;
use crate::session::SessionCookie;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors, &state.config.frontend.url);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Constructs services and the GraphQL schema over the given repositories.
pub fn build_state(
    config: AppConfig,
    repositories: Repositories,
    db_pool: Option<DatabasePool>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repositories.users),
        mailer,
        &config.auth,
        &config.frontend,
    ));
    let item_service = Arc::new(ItemService::new(
        Arc::clone(&repositories.items),
        Arc::clone(&repositories.users),
    ));
    let cart_service = Arc::new(CartService::new(
        Arc::clone(&repositories.cart_items),
        Arc::clone(&repositories.items),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&repositories.users)));

    let session_cookie = SessionCookie::from_config(&config.auth);
    let schema = build_schema(
        Arc::clone(&auth_service),
        item_service,
        cart_service,
        user_service,
        session_cookie.clone(),
    );

    AppState {
        config: Arc::new(config),
        db_pool,
        auth_service,
        schema,
        session_cookie,
    }
}

/// Runs the ShopHub server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(backend = ?config.database.backend, "Starting ShopHub server...");

    // ── Step 1: Store ────────────────────────────────────────────
    let (repositories, db_pool) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            (Repositories::postgres(&pool), Some(pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            (Repositories::in_memory(), None)
        }
    };

    // ── Step 2: Mail ─────────────────────────────────────────────
    let mailer = build_mailer(&config.mail)?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, repositories, db_pool.clone(), mailer);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(address = %addr, "ShopHub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }
    tracing::info!("ShopHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
