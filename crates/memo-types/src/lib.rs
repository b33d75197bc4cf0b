//! Shared types for memo.rs.
//!
//! [`Note`] is the JSON shape exchanged between `memo-server` and every
//! client.  Field names are camelCase on the wire (`createdAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error message returned when a note is submitted without content.
pub const CONTENT_REQUIRED: &str = "content is required";

/// Error message returned when a delete request carries no id.
pub const ID_REQUIRED: &str = "id is required";

/// A single timestamped note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque identifier assigned by the server at creation.
    pub id: String,
    /// Trimmed, non-empty note text.
    pub content: String,
    /// Server-assigned creation time (RFC 3339, UTC).
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /notes`.
///
/// `content` is optional so that a missing field surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of a successful `DELETE /notes/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteNoteResponse {
    pub ok: bool,
}

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
