use chrono::{DateTime, SecondsFormat, Utc};

/// A row in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NoteRecord {
    /// Fixed-width column form of `created_at`; lexical order is chronological.
    pub fn created_at_column(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}
