//! Response decoding.
//!
//! Every HTTP response is reduced to a [`RawResponse`] and then classified:
//! non-JSON bodies, unparseable JSON and server-reported errors each become a
//! distinct [`ClientError`] variant before the payload is decoded.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Status, content type and body of a response, detached from the transport.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_owned()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Decode a JSON payload.  `fallback` is the message used when a failing
/// response carries no `error` field.
pub fn decode_json<T: DeserializeOwned>(raw: &RawResponse, fallback: &str) -> Result<T, ClientError> {
    if !raw.is_json() {
        return Err(ClientError::NonJson { status: raw.status });
    }
    let value: Value = serde_json::from_slice(&raw.body).map_err(ClientError::Parse)?;
    if !raw.is_success() {
        return Err(server_error(raw.status, Some(&value), fallback));
    }
    serde_json::from_value(value).map_err(ClientError::Parse)
}

/// Decode the response to a delete.  A success status is enough; the body
/// is only consulted for the error message on failure.
pub fn decode_delete(raw: &RawResponse) -> Result<(), ClientError> {
    if raw.is_success() {
        return Ok(());
    }
    let value = serde_json::from_slice::<Value>(&raw.body).ok();
    Err(server_error(raw.status, value.as_ref(), "failed to delete"))
}

fn server_error(status: u16, body: Option<&Value>, fallback: &str) -> ClientError {
    let message = body
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_owned();
    ClientError::Server { status, message }
}
