use crate::state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    let permissive = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    let Some(origins_str) = &state.config.cors_allowed_origins else {
        // Wildcard – suitable for development; set MEMO_CORS_ORIGINS in production.
        return permissive;
    };

    // Parse the comma-separated origin list and build a restrictive layer.
    let origins: Vec<axum::http::HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if origins.is_empty() {
        permissive
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_headers(Any)
            .allow_methods(Any)
    }
}
