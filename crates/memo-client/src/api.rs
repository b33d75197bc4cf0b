//! Client side of the notes HTTP API.
//!
//! [`NotesApi`] is the seam the session talks through; [`HttpNotesApi`] is the
//! `reqwest` implementation used against a running memo-server.

use std::future::Future;

use memo_types::{CreateNoteRequest, Note};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;

use crate::decode::{RawResponse, decode_delete, decode_json};
use crate::error::ClientError;

pub trait NotesApi: Send + Sync {
    /// Every note, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Note>, ClientError>> + Send;
    fn create(&self, content: &str) -> impl Future<Output = Result<Note, ClientError>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// `reqwest`-backed [`NotesApi`].
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    base: Url,
    client: Client,
}

impl HttpNotesApi {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_owned()));
        }
        let client = Client::builder()
            .user_agent(concat!("memo-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Ok(Self { base, client })
    }

    /// `{base}/notes[/{id}]` with `id` percent-encoded as a single segment.
    fn notes_url(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty().push("notes");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();
        debug!(status, content_type = ?content_type, bytes = body.len(), "notes API response");
        Ok(RawResponse { status, content_type, body })
    }
}

impl NotesApi for HttpNotesApi {
    async fn list(&self) -> Result<Vec<Note>, ClientError> {
        let url = self.notes_url(None)?;
        let raw = self.send(self.client.get(url)).await?;
        decode_json(&raw, "failed to load")
    }

    async fn create(&self, content: &str) -> Result<Note, ClientError> {
        let url = self.notes_url(None)?;
        let body = CreateNoteRequest { content: Some(content.to_owned()) };
        let raw = self.send(self.client.post(url).json(&body)).await?;
        decode_json(&raw, "failed to save")
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.notes_url(Some(id))?;
        let raw = self.send(self.client.delete(url)).await?;
        decode_delete(&raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn notes_url_joins_segments() {
        let api = HttpNotesApi::new("http://localhost:3000").unwrap();
        assert_eq!(api.notes_url(None).unwrap().as_str(), "http://localhost:3000/notes");

        let api = HttpNotesApi::new("http://localhost:3000/memo/").unwrap();
        assert_eq!(
            api.notes_url(Some("a b/c")).unwrap().as_str(),
            "http://localhost:3000/memo/notes/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(matches!(HttpNotesApi::new("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(HttpNotesApi::new("mailto:me@example.com"), Err(ClientError::InvalidUrl(_))));
    }
}
