use thiserror::Error;

/// Errors that can be returned by memo-client operations.
///
/// The `Display` text is what a [`crate::session::SessionState`] shows in its
/// `error` field, so every message is written for the end user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than JSON, which usually
    /// means the URL points at the wrong service or the server is misconfigured.
    #[error(
        "server returned a non-JSON response ({status}); check MEMO_SERVER_URL and that \
         memo-server is running against a migrated database (MEMO_DATABASE_URL)"
    )]
    NonJson { status: u16 },

    /// The response claimed to be JSON but could not be decoded.
    #[error("failed to parse response; check the API and database setup")]
    Parse(#[source] serde_json::Error),

    /// The server reported a failure in its JSON error body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The configured server URL cannot address the notes API.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}
