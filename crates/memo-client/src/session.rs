//! Note Session: the client's reconciled view of the note list.
//!
//! [`SessionState`] holds the view and exposes one pure transition per event
//! (load, save and delete, each split into begin/finish).  [`NoteSession`]
//! drives those transitions around calls to a [`NotesApi`].
//!
//! The list is only changed by confirmed server responses: a created note is
//! prepended once the server returns it, a deleted note is filtered out once
//! the server confirms.  Failures leave `notes` untouched and set `error`.

use std::sync::{Mutex, PoisonError};

use memo_types::Note;
use tracing::{debug, warn};

use crate::api::NotesApi;
use crate::error::ClientError;

/// Everything the view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Newest first.
    pub notes: Vec<Note>,
    /// Draft text of the note being written.
    pub input: String,
    /// A full reload is in flight.
    pub loading: bool,
    /// A create is in flight.
    pub saving: bool,
    /// Last failure, cleared by the next successful action.
    pub error: Option<String>,
}

impl SessionState {
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Whether a submit would issue a request right now.
    pub fn can_submit(&self) -> bool {
        !self.saving && !self.input.trim().is_empty()
    }

    pub fn begin_load(mut self) -> Self {
        self.loading = true;
        self.error = None;
        self
    }

    /// Replace the list wholesale on success; keep it on failure.
    pub fn finish_load(mut self, result: Result<Vec<Note>, ClientError>) -> Self {
        match result {
            Ok(notes) => self.notes = notes,
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
        self
    }

    /// Start a save of the trimmed draft.  Returns the content to send, or
    /// `None` when the draft is blank or a save is already in flight.
    pub fn begin_save(mut self) -> (Self, Option<String>) {
        if !self.can_submit() {
            return (self, None);
        }
        let content = self.input.trim().to_owned();
        self.saving = true;
        self.error = None;
        (self, Some(content))
    }

    /// Prepend the created note and clear the draft; on failure keep the
    /// draft so it can be resubmitted.
    pub fn finish_save(mut self, result: Result<Note, ClientError>) -> Self {
        match result {
            Ok(note) => {
                self.notes.insert(0, note);
                self.input.clear();
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.saving = false;
        self
    }

    /// Drop the note once the server confirmed the delete.
    pub fn finish_delete(mut self, id: &str, result: Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => {
                self.notes.retain(|n| n.id != id);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self
    }
}

/// A key event from the note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// Enter submits unless the line-break modifier (Shift) is held.
pub fn is_submit_key(key: Key, line_break_modifier: bool) -> bool {
    key == Key::Enter && !line_break_modifier
}

/// Drives [`SessionState`] transitions around [`NotesApi`] calls.
///
/// The state lock is never held across an await, so several operations may
/// be polled concurrently; each applies its finishing transition when its
/// request completes.  Concurrent creates are suppressed by the `saving`
/// guard; concurrent deletes are independent filters.
#[derive(Debug)]
pub struct NoteSession<A> {
    api: A,
    state: Mutex<SessionState>,
}

impl<A: NotesApi> NoteSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> SessionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.apply(|s| s.with_input(input));
    }

    /// Fetch the full list, replacing the current one.
    pub async fn reload(&self) {
        self.apply(SessionState::begin_load);
        let result = self.api.list().await;
        if let Err(e) = &result {
            warn!(error = %e, "failed to load notes");
        }
        self.apply(|s| s.finish_load(result));
    }

    /// Save the current draft.  Returns `false` when nothing was sent.
    pub async fn submit(&self) -> bool {
        let Some(content) = self.transition(SessionState::begin_save) else {
            debug!("submit ignored: blank draft or save in flight");
            return false;
        };
        let result = self.api.create(&content).await;
        if let Err(e) = &result {
            warn!(error = %e, "failed to save note");
        }
        self.apply(|s| s.finish_save(result));
        true
    }

    pub async fn delete(&self, id: &str) {
        let result = self.api.delete(id).await;
        if let Err(e) = &result {
            warn!(note_id = %id, error = %e, "failed to delete note");
        }
        self.apply(|s| s.finish_delete(id, result));
    }

    fn apply(&self, f: impl FnOnce(SessionState) -> SessionState) {
        self.transition(|s| (f(s), ()));
    }

    fn transition<R>(&self, f: impl FnOnce(SessionState) -> (SessionState, R)) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, out) = f(std::mem::take(&mut *guard));
        *guard = next;
        out
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
