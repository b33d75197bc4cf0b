//! Per-request trace-ID injection and request/response logging.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Bodies larger than this are summarized rather than logged.
const MAX_LOGGED_BODY: usize = 1024;

/// Request bodies are buffered here, so the size cap is enforced here too.
/// Matches axum's `DefaultBodyLimit`.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    // Reuse the caller's trace ID when it is a valid UUID.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let (mut parts, body) = req.into_parts();
        let req_bytes = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "request body rejected");
                let err = if e.is::<LengthLimitError>() {
                    ServerError::PayloadTooLarge
                } else {
                    ServerError::Validation("request body could not be read".to_owned())
                };
                let mut response = err.into_response();
                if let Some(value) = trace_header {
                    response.headers_mut().insert(X_TRACE_ID, value);
                }
                return response;
            }
        };
        log_body("request", &parts.headers, &req_bytes);
        if let Some(value) = &trace_header {
            parts.headers.insert(X_TRACE_ID, value.clone());
        }

        let response = next.run(Request::from_parts(parts, Body::from(req_bytes))).await;

        let (mut parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "response body could not be read");
                Bytes::new()
            }
        };
        log_body("response", &parts.headers, &res_bytes);
        if let Some(value) = trace_header {
            parts.headers.insert(X_TRACE_ID, value);
        }

        info!(
            status = parts.status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        Response::from_parts(parts, Body::from(res_bytes))
    }
    .instrument(span)
    .await
}

/// Log a buffered body when it is small JSON.
fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let is_json = content_type.contains("application/json");

    if is_json && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        debug!("{direction} body: [skipped: type={content_type}, size={}]", bytes.len());
    }
}
