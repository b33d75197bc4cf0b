//! Note Store operations: list, create and delete.
//!
//! Input validation, id and timestamp assignment live here so handlers stay
//! thin and the rules hold for any [`NoteStore`] backend.

use chrono::{SubsecRound, Utc};
use memo_types::{CONTENT_REQUIRED, ID_REQUIRED, Note};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{NoteRecord, NoteStore};
use crate::error::{ServerError, StorageContext};

/// All notes, newest first.
pub async fn list_notes<S: NoteStore>(store: &S) -> Result<Vec<Note>, ServerError> {
    let records = store.list_notes().await.storage_context("failed to load notes")?;
    Ok(records.into_iter().map(NoteRecord::into_note).collect())
}

/// Persist a new note.  `content` is trimmed; blank or missing content is a
/// validation error and nothing is written.
pub async fn create_note<S: NoteStore>(
    store: &S,
    content: Option<&str>,
) -> Result<Note, ServerError> {
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(ServerError::Validation(CONTENT_REQUIRED.to_owned()));
    }

    // Stored with microsecond precision; truncate so the returned note
    // matches what a later list yields.
    let record = NoteRecord {
        id: Uuid::new_v4().to_string(),
        content: content.to_owned(),
        created_at: Utc::now().trunc_subsecs(6),
    };
    store
        .insert_note(record.clone())
        .await
        .storage_context("failed to save note")?;
    info!(note_id = %record.id, chars = record.content.chars().count(), "note created");
    Ok(record.into_note())
}

/// Remove the note keyed by `id`.  Succeeds whether or not the note existed.
pub async fn delete_note<S: NoteStore>(store: &S, id: &str) -> Result<(), ServerError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ServerError::Validation(ID_REQUIRED.to_owned()));
    }
    let removed = store
        .delete_note(id)
        .await
        .storage_context("failed to delete note")?;
    if removed == 0 {
        debug!(note_id = %id, "delete matched no note");
    } else {
        info!(note_id = %id, "note deleted");
    }
    Ok(())
}

impl NoteRecord {
    pub fn into_note(self) -> Note {
        Note {
            id: self.id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
