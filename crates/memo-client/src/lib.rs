//! memo-client – talks to memo-server and keeps a local view of the notes.

pub mod api;
pub mod decode;
pub mod error;
pub mod prompt;
pub mod session;
pub mod view;

pub use api::{HttpNotesApi, NotesApi};
pub use error::ClientError;
pub use prompt::{Prompt, Step};
pub use session::{Key, NoteSession, SessionState, is_submit_key};
