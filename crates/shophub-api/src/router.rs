//! Route definitions for the ShopHub HTTP API.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Build the router: the GraphQL endpoint and the health check.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql_handler),
        )
        .route("/health", get(handlers::health::health))
        .with_state(state)
}
