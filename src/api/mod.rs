//! Client side of the notes REST backend.
//!
//! The backend itself is an external collaborator. This module only knows its
//! contract:
//!
//! - `GET /notes?userId=<id>` returns `{ "data": Note[] }`
//! - `POST /notes` takes a [`CreateNoteBody`] and returns the created note
//! - `PUT /notes/{id}` takes `{ "noteType": .. }`
//! - `DELETE /notes/{id}`

mod http;

pub use http::HttpNotesApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::{Note, NoteBucket, NoteCategory, NoteDraft};
use crate::error::Result;
use crate::session::Role;

pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

#[async_trait]
pub trait NotesApi: Send + Sync {
    /// All notes scoped to `user_id`, across every bucket.
    async fn fetch_notes(&self, user_id: &str) -> Result<Vec<Note>>;

    async fn create_note(&self, body: &CreateNoteBody) -> Result<Note>;

    async fn update_note_type(&self, id: &str, bucket: NoteBucket) -> Result<()>;

    async fn delete_note(&self, id: &str) -> Result<()>;
}

/// Request body of `POST /notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteBody {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub bg_color: String,
    pub banner: String,
    #[serde(rename = "isHTML")]
    pub is_html: bool,
    pub note_type: NoteBucket,
    #[serde(rename = "type")]
    pub category: NoteCategory,
    #[serde(rename = "entityID")]
    pub entity_id: String,
    pub entity_type: String,
}

impl CreateNoteBody {
    /// Merge a draft with the creation defaults for `user_id` acting as `role`.
    pub fn from_draft(draft: NoteDraft, user_id: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            title: draft.title,
            content: draft.content,
            bg_color: draft.color.unwrap_or_else(|| DEFAULT_BG_COLOR.to_string()),
            banner: draft.banner.unwrap_or_default(),
            is_html: draft.is_html,
            note_type: draft.bucket.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            entity_id: draft.entity_id.unwrap_or_else(|| user_id.to_string()),
            entity_type: role.entity_type(),
        }
    }
}

/// Body of `PUT /notes/{id}` for a bucket move
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteTypeBody {
    pub note_type: NoteBucket,
}

/// `{ "data": ... }` envelope the backend wraps responses in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
