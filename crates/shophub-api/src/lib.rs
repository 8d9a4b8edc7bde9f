//! # shophub-api
//!
//! HTTP layer for ShopHub built on Axum and async-graphql.
//!
//! Serves the GraphQL endpoint, resolves the `token` session cookie into a
//! request context, maps [`AppError`](shophub_core::AppError) onto GraphQL
//! errors, and wires the CORS, tracing and request logging middleware.

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod schema;
pub mod session;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
