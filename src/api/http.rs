use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;

use super::{CreateNoteBody, DataEnvelope, NotesApi, UpdateNoteTypeBody};
use crate::config::Config;
use crate::entity::{Note, NoteBucket};
use crate::error::{NotedeskError, Result};

/// `POST /notes` answers either with an envelope or with the bare note.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedNote {
    Wrapped(DataEnvelope<Note>),
    Bare(Note),
}

/// [`NotesApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpNotesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let raw = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(raw)
            .map_err(|e| NotedeskError::Config(format!("invalid API URL '{}': {}", raw, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(NotedeskError::Config(format!(
                "API URL must be http(s): '{}'",
                raw
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("notedesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api = Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(match config.api_token.clone() {
            Some(token) => api.with_token(token),
            None => api,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/notes`, plus the note id as one escaped segment when given.
    fn notes_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                NotedeskError::Config(format!("API URL cannot take a path: '{}'", self.base_url))
            })?;
            segments.pop_if_empty().push("notes");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text
        };
        Err(NotedeskError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn fetch_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        tracing::debug!(user_id, "GET /notes");
        let resp = self
            .request(Method::GET, self.notes_url(None)?)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let envelope: DataEnvelope<Vec<Note>> = Self::check(resp).await?.json().await?;
        Ok(envelope.data)
    }

    async fn create_note(&self, body: &CreateNoteBody) -> Result<Note> {
        tracing::debug!(user_id = %body.user_id, "POST /notes");
        let resp = self
            .request(Method::POST, self.notes_url(None)?)
            .json(body)
            .send()
            .await?;
        let created: CreatedNote = Self::check(resp).await?.json().await?;
        Ok(match created {
            CreatedNote::Wrapped(envelope) => envelope.data,
            CreatedNote::Bare(note) => note,
        })
    }

    async fn update_note_type(&self, id: &str, bucket: NoteBucket) -> Result<()> {
        tracing::debug!(id, bucket = bucket.as_str(), "PUT /notes/{{id}}");
        let resp = self
            .request(Method::PUT, self.notes_url(Some(id))?)
            .json(&UpdateNoteTypeBody { note_type: bucket })
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        tracing::debug!(id, "DELETE /notes/{{id}}");
        let resp = self
            .request(Method::DELETE, self.notes_url(Some(id))?)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
