//! Line-oriented input for the interactive `memo` session.
//!
//! Each stdin line is either a command (`:q`, `:reload`, `:rm <id>`) or note
//! text.  A line ending with `\` continues the note on the next line; any
//! other line submits it.  Commands are only recognised at the start of a
//! note, never in the middle of a continued one.
//!
//! The text of a failed save stays in the session's `input`, not in the
//! prompt's draft, so commands keep working after a failure.  An empty line
//! retries it; new text replaces it.

use crate::api::NotesApi;
use crate::session::{Key, NoteSession, is_submit_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reload,
    /// `:rm` followed by an id; the id is empty when none was given.
    Remove(String),
}

/// Recognise a command line.  Surrounding whitespace is ignored.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        ":q" => Some(Command::Quit),
        ":reload" => Some(Command::Reload),
        cmd => {
            let rest = cmd.strip_prefix(":rm")?;
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return None;
            }
            Some(Command::Remove(rest.trim().to_owned()))
        }
    }
}

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Leave the session.
    Quit,
    /// The view changed; print it.
    Render,
    /// `:rm` without an id.
    MissingId,
    /// Nothing to show (continued line, or nothing to submit).
    Idle,
}

/// Accumulates continued lines into a note and dispatches commands.
#[derive(Debug, Default)]
pub struct Prompt {
    draft: String,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text collected so far for a continued note.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub async fn feed<A: NotesApi>(&mut self, session: &NoteSession<A>, line: &str) -> Step {
        if self.draft.is_empty() {
            match parse_command(line) {
                Some(Command::Quit) => return Step::Quit,
                Some(Command::Reload) => {
                    session.reload().await;
                    return Step::Render;
                }
                Some(Command::Remove(id)) if id.is_empty() => return Step::MissingId,
                Some(Command::Remove(id)) => {
                    session.delete(&id).await;
                    return Step::Render;
                }
                None => {}
            }
        }

        let (text, continued) = match line.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (line, false),
        };
        if !self.draft.is_empty() {
            self.draft.push('\n');
        }
        self.draft.push_str(text);

        if !is_submit_key(Key::Enter, continued) {
            return Step::Idle;
        }
        let draft = std::mem::take(&mut self.draft);
        if !draft.trim().is_empty() {
            session.set_input(draft);
        }
        if session.submit().await {
            Step::Render
        } else {
            Step::Idle
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
