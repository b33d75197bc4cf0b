//! Note routes: `GET /notes`, `POST /notes`, `DELETE /notes/{id}`.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use memo_types::{CreateNoteRequest, DeleteNoteResponse, ErrorBody, ID_REQUIRED, Note};
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::services::notes;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_notes, create_note, delete_note),
    components(schemas(Note, CreateNoteRequest, DeleteNoteResponse, ErrorBody))
)]
pub struct NotesApi;

/// Register note routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/", delete(delete_without_id))
        .route("/notes/{id}", delete(delete_note))
}

#[utoipa::path(
    get,
    path = "/notes",
    tag = "notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<Note>),
        (status = 500, description = "Storage error", body = ErrorBody),
    )
)]
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Note>>, ServerError> {
    Ok(Json(notes::list_notes(state.store.as_ref()).await?))
}

/// Unreadable bodies (not JSON, wrong content type, non-string `content`)
/// are treated the same as missing content.
#[utoipa::path(
    post,
    path = "/notes",
    tag = "notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created", body = Note),
        (status = 400, description = "Content missing or blank", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody),
    )
)]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>, ServerError> {
    let content = match payload {
        Ok(Json(req)) => req.content,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable note body");
            None
        }
    };
    let note = notes::create_note(state.store.as_ref(), content.as_deref()).await?;
    Ok(Json(note))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "notes",
    params(
        ("id" = String, Path, description = "ID of the note to delete")
    ),
    responses(
        (status = 200, description = "Deleted, or no such note", body = DeleteNoteResponse),
        (status = 400, description = "Blank or undecodable id", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody),
    )
)]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteNoteResponse>, ServerError> {
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection, "unreadable note id");
        ServerError::Validation(ID_REQUIRED.to_owned())
    })?;
    notes::delete_note(state.store.as_ref(), &id).await?;
    Ok(Json(DeleteNoteResponse { ok: true }))
}

async fn delete_without_id() -> ServerError {
    ServerError::Validation(ID_REQUIRED.to_owned())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::entities::SqliteStore;
    use crate::routes;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use memo_types::CONTENT_REQUIRED;
    use serde_json::Value;
    use tower::ServiceExt;
    use tracing_test::traced_test;

    async fn test_state() -> Arc<AppState> {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        Arc::new(AppState {
            config: Arc::new(Config::default()),
            store: Arc::new(store),
        })
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, content_type, body)
    }

    fn get_notes() -> Request<Body> {
        Request::get("/notes").body(Body::empty()).unwrap()
    }

    fn post_note(body: &str) -> Request<Body> {
        Request::post("/notes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn delete_req(id: &str) -> Request<Body> {
        Request::delete(format!("/notes/{id}")).body(Body::empty()).unwrap()
    }

    fn contents(list: &Value) -> Vec<&str> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|n| n["content"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn buy_milk_call_mom_scenario() {
        let app = routes::build(test_state().await);

        let (status, content_type, milk) = send(&app, post_note(r#"{"content":"buy milk"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().contains("application/json"));
        assert!(milk["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(milk["createdAt"].as_str().is_some());

        let (_, _, list) = send(&app, get_notes()).await;
        assert_eq!(contents(&list), ["buy milk"]);

        send(&app, post_note(r#"{"content":"call mom"}"#)).await;
        let (_, _, list) = send(&app, get_notes()).await;
        assert_eq!(contents(&list), ["call mom", "buy milk"]);

        let (status, _, body) = send(&app, delete_req(milk["id"].as_str().unwrap())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "ok": true }));
        let (_, _, list) = send(&app, get_notes()).await;
        assert_eq!(contents(&list), ["call mom"]);

        let (status, _, body) = send(&app, delete_req("3f1c9a52-unknown")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        let (_, _, list) = send(&app, get_notes()).await;
        assert_eq!(contents(&list), ["call mom"]);
    }

    #[tokio::test]
    async fn blank_or_missing_content_is_bad_request() {
        let app = routes::build(test_state().await);
        for body in [r#"{"content":"   "}"#, r#"{}"#, r#"{"content":42}"#, "not json"] {
            let (status, _, err) = send(&app, post_note(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(err["error"], CONTENT_REQUIRED);
        }
        let (_, _, list) = send(&app, get_notes()).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_id_is_bad_request() {
        let app = routes::build(test_state().await);
        for req in [delete_req("%20"), Request::delete("/notes/").body(Body::empty()).unwrap()] {
            let (status, _, err) = send(&app, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(err["error"], ID_REQUIRED);
        }
    }

    #[tokio::test]
    async fn undecodable_id_is_json_bad_request() {
        let app = routes::build(test_state().await);
        let (status, content_type, err) = send(&app, delete_req("%FF")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(content_type.unwrap().contains("application/json"));
        assert_eq!(err["error"], ID_REQUIRED);
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        let app = routes::build(test_state().await);
        for req in [
            Request::put("/notes").body(Body::empty()).unwrap(),
            Request::get("/notes/abc").body(Body::empty()).unwrap(),
        ] {
            let (status, content_type, err) = send(&app, req).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert!(content_type.unwrap().contains("application/json"));
            assert_eq!(err["error"], "method not allowed");
        }
    }

    #[tokio::test]
    async fn oversized_body_is_json_413() {
        let app = routes::build(test_state().await);
        let huge = "x".repeat(crate::middleware::trace::MAX_REQUEST_BODY + 1);
        let (status, content_type, err) =
            send(&app, post_note(&format!(r#"{{"content":"{huge}"}}"#))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(content_type.unwrap().contains("application/json"));
        assert_eq!(err["error"], "request body too large");

        let (_, _, list) = send(&app, get_notes()).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_note_is_stored_trimmed() {
        let app = routes::build(test_state().await);
        let (_, _, note) = send(&app, post_note(r#"{"content":"  hello  "}"#)).await;
        assert_eq!(note["content"], "hello");
    }

    #[tokio::test]
    #[traced_test]
    async fn storage_failure_is_json_500() {
        let state = test_state().await;
        let app = routes::build(state.clone());
        state.store.close().await;

        let (status, content_type, err) = send(&app, get_notes()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.unwrap().contains("application/json"));
        assert_eq!(err["error"], "failed to load notes");

        let (status, _, err) = send(&app, post_note(r#"{"content":"x"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err["error"], "failed to save note");

        let (status, _, err) = send(&app, delete_req("x")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err["error"], "failed to delete note");

        assert!(logs_contain("storage failure"));
    }

    #[tokio::test]
    async fn responses_carry_trace_id() {
        let app = routes::build(test_state().await);
        let res = app.oneshot(get_notes()).await.unwrap();
        assert!(res.headers().contains_key(crate::middleware::trace::X_TRACE_ID));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let app = routes::build(test_state().await);
        let req = Request::get("/nope").body(Body::empty()).unwrap();
        let (status, _, err) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "not found");
    }
}
