use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// Read-only API, so only `GET` and preflight requests are allowed.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_headers(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS]);

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .map(|list| {
            list.split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default();

    if origins.is_empty() {
        // No allow-list configured.
        base.allow_origin(Any)
    } else {
        base.allow_origin(origins)
    }
}
