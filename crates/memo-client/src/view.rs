//! Plain-text rendering of a [`SessionState`].

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::session::SessionState;

pub const LOADING: &str = "loading...";
pub const EMPTY_STATE: &str = "Notes you add will show up here with their date and time.";

/// `YYYY. MM. DD. HH:MM:SS` in the local time zone.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%Y. %m. %d. %H:%M:%S").to_string()
}

/// Lines to print for `state`, newest note first.
pub fn render(state: &SessionState) -> Vec<String> {
    render_in(state, &Local)
}

pub fn render_in<Tz: TimeZone>(state: &SessionState, tz: &Tz) -> Vec<String>
where
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    if state.loading {
        lines.push(LOADING.to_owned());
    } else if state.notes.is_empty() {
        lines.push(EMPTY_STATE.to_owned());
    } else {
        for note in &state.notes {
            lines.push(note.content.clone());
            lines.push(format!("  {}  [{}]", format_timestamp_in(&note.created_at, tz), note.id));
        }
    }
    if state.saving {
        lines.push("saving...".to_owned());
    }
    if let Some(error) = &state.error {
        lines.push(format!("error: {error}"));
    }
    lines
}
