// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NoteBucket, NoteCategory};

/// A note record, in the camelCase shape the dashboard backend speaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "bgColor", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, rename = "isHTML")]
    pub is_html: bool,
    #[serde(default, rename = "entityID", skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Remote lifecycle bucket; local notes leave it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_type: Option<NoteBucket>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            color: None,
            banner: None,
            created_at: Utc::now(),
            is_html: false,
            entity_id: None,
            entity_type: None,
            note_type: None,
            category: None,
        }
    }

    /// The bucket this note belongs to. Records without one are active notes.
    pub fn bucket(&self) -> NoteBucket {
        self.note_type.unwrap_or_default()
    }

    /// Short form of the id for listings
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Caller-supplied fields for creating a note.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: Option<String>,
    pub banner: Option<String>,
    pub is_html: bool,
    pub bucket: Option<NoteBucket>,
    pub category: Option<NoteCategory>,
    pub entity_id: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Name of the first required field left blank, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.content.trim().is_empty() {
            Some("content")
        } else {
            None
        }
    }

    /// Build a local note from this draft. No lifecycle bucket is attached.
    pub fn into_note(self) -> Note {
        let mut note = Note::new(self.title, self.content);
        note.color = self.color;
        note.banner = self.banner;
        note.is_html = self.is_html;
        note.category = self.category;
        note.entity_id = self.entity_id;
        note
    }
}
