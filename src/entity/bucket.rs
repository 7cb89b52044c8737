// src/entity/bucket.rs
use serde::{Deserialize, Serialize};

/// Lifecycle bucket of a remote note. A note sits in exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoteBucket {
    #[default]
    Note,
    Archive,
    Trash,
}

impl NoteBucket {
    pub const ALL: [NoteBucket; 3] = [NoteBucket::Note, NoteBucket::Archive, NoteBucket::Trash];

    /// Wire name, as sent in `noteType`
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteBucket::Note => "NOTE",
            NoteBucket::Archive => "ARCHIVE",
            NoteBucket::Trash => "TRASH",
        }
    }
}

impl std::fmt::Display for NoteBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteBucket::Note => write!(f, "note"),
            NoteBucket::Archive => write!(f, "archive"),
            NoteBucket::Trash => write!(f, "trash"),
        }
    }
}

impl std::str::FromStr for NoteBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "note" | "notes" => Ok(NoteBucket::Note),
            "archive" | "archived" => Ok(NoteBucket::Archive),
            "trash" | "trashed" => Ok(NoteBucket::Trash),
            _ => Err(format!("Invalid note bucket: {}", s)),
        }
    }
}

/// Categorical tag, independent of the lifecycle bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    #[default]
    Personal,
    Work,
    Reminder,
    Task,
}

impl std::fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteCategory::Personal => write!(f, "personal"),
            NoteCategory::Work => write!(f, "work"),
            NoteCategory::Reminder => write!(f, "reminder"),
            NoteCategory::Task => write!(f, "task"),
        }
    }
}

impl std::str::FromStr for NoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personal" => Ok(NoteCategory::Personal),
            "work" => Ok(NoteCategory::Work),
            "reminder" => Ok(NoteCategory::Reminder),
            "task" => Ok(NoteCategory::Task),
            _ => Err(format!("Invalid note type: {}", s)),
        }
    }
}
