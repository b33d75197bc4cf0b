//! `GET /health`: reports whether the note store is reachable.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use memo_types::ErrorBody;
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::entities::NoteStore;
use crate::error::{ServerError, StorageContext};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// `{"status": "ok", "storage": "sqlite", "version": "..."}` once a trivial
/// query has gone through the store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = Value),
        (status = 500, description = "Store unreachable", body = ErrorBody),
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ServerError> {
    state.store.ping().await.storage_context("note store unavailable")?;
    Ok(Json(json!({
        "status": "ok",
        "storage": "sqlite",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
