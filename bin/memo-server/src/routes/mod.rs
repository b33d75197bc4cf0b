//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI document endpoint (disable with `MEMO_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - `/notes` routes

pub mod doc;
mod health;
mod notes;

use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ServerError;
use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(notes::router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed);

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

/// Keep unknown routes on the JSON error contract.
async fn not_found() -> ServerError {
    ServerError::NotFound("not found".to_owned())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
