//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use shophub_core::config::CorsConfig;

/// Builds a CORS tower layer.
///
/// The session cookie must travel cross-origin, so credentials are allowed
/// and origins are listed explicitly: the frontend URL plus any configured
/// extras.
pub fn build_cors_layer(config: &CorsConfig, frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(frontend_url.trim_end_matches('/'))
        .chain(config.allowed_origins.iter().map(String::as_str))
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
