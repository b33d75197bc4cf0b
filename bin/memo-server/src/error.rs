//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Storage errors are logged with full detail but only a generic,
//! operation-level message is returned to the caller so that SQL or file
//! paths never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use memo_types::ErrorBody;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the memo-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent missing or empty input (empty content, blank id).
    #[error("validation error: {0}")]
    Validation(String),

    /// The backing record store failed to read or write.
    #[error("{context}: {source}")]
    Storage {
        /// Generic message shown to the caller, e.g. `"failed to load notes"`.
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The caller referenced a route that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The route exists but not for this HTTP method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request body exceeds the accepted size.
    #[error("request body too large")]
    PayloadTooLarge,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let client_message = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::Validation(m) | ServerError::NotFound(m) => m.clone(),
            ServerError::MethodNotAllowed | ServerError::PayloadTooLarge => self.to_string(),

            ServerError::Storage { context, source } => {
                error!(error = %source, context = %context, "storage failure");
                (*context).to_owned()
            }
        };
        (status, Json(ErrorBody { error: client_message })).into_response()
    }
}

/// Attach a caller-facing context message to a failed storage call.
pub trait StorageContext<T> {
    fn storage_context(self, context: &'static str) -> Result<T, ServerError>;
}

impl<T> StorageContext<T> for Result<T, sqlx::Error> {
    fn storage_context(self, context: &'static str) -> Result<T, ServerError> {
        self.map_err(|source| ServerError::Storage { context, source })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ServerError::Validation("content is required".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_context_keeps_source() {
        let res: Result<(), sqlx::Error> = Err(sqlx::Error::PoolClosed);
        let err = res.storage_context("failed to load notes").unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("failed to load notes"));
    }
}
