use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{CreateNoteBody, NotesApi};
use crate::entity::{Note, NoteBucket, NoteDraft};
use crate::error::{NotedeskError, Result};
use crate::notify::{Notifier, Toast};
use crate::session::UserSession;

use super::filter::NoteFilter;
use super::partition::{partition_notes, NoteBuckets};

#[derive(Debug, Default)]
struct BoardState {
    buckets: NoteBuckets,
    is_loading: bool,
}

/// Remote-backed notes for one user, split into Note/Archive/Trash.
///
/// Clones share state. Overlapping calls are not serialized: whichever
/// response lands last decides the lists.
#[derive(Clone)]
pub struct NotesBoard {
    api: Arc<dyn NotesApi>,
    notifier: Arc<dyn Notifier>,
    session: UserSession,
    state: Arc<Mutex<BoardState>>,
}

impl NotesBoard {
    pub fn new(api: Arc<dyn NotesApi>, notifier: Arc<dyn Notifier>, session: UserSession) -> Self {
        Self {
            api,
            notifier,
            session,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Snapshot of all three lists
    pub fn buckets(&self) -> NoteBuckets {
        self.state().buckets.clone()
    }

    pub fn list(&self, bucket: NoteBucket) -> Vec<Note> {
        self.state().buckets.get(bucket).to_vec()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.list(NoteBucket::Note)
    }

    pub fn archive(&self) -> Vec<Note> {
        self.list(NoteBucket::Archive)
    }

    pub fn trash(&self) -> Vec<Note> {
        self.list(NoteBucket::Trash)
    }

    pub fn filtered(&self, bucket: NoteBucket, filter: &NoteFilter) -> Vec<Note> {
        let state = self.state();
        filter
            .apply(state.buckets.get(bucket))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look a note up by full id, or by an id prefix naming exactly one note.
    pub fn resolve(&self, id: &str) -> Result<Note> {
        let state = self.state();
        if let Some(note) = state.buckets.get_note(id) {
            return Ok(note.clone());
        }

        let matches: Vec<&Note> = NoteBucket::ALL
            .into_iter()
            .flat_map(|b| state.buckets.get(b).iter())
            .filter(|n| !id.is_empty() && n.id.starts_with(id))
            .collect();
        match matches.as_slice() {
            [note] => Ok((*note).clone()),
            [] => Err(NotedeskError::NotFound(id.to_string())),
            _ => Err(NotedeskError::InvalidValue(format!(
                "id prefix '{}' matches {} notes",
                id,
                matches.len()
            ))),
        }
    }

    /// Load every note of the session user and replace all three lists.
    ///
    /// Without a user id this returns `MissingUser` and makes no request. A
    /// failed request empties the lists.
    pub async fn fetch_notes(&self) -> Result<()> {
        let Some(user_id) = self.session.user_id().map(str::to_string) else {
            tracing::warn!("cannot fetch notes: no user id in session");
            self.state().is_loading = false;
            return Err(NotedeskError::MissingUser);
        };

        self.state().is_loading = true;
        let result = self.api.fetch_notes(&user_id).await;

        let mut state = self.state();
        state.is_loading = false;
        match result {
            Ok(notes) => {
                state.buckets = partition_notes(notes);
                tracing::debug!(
                    user_id = %user_id,
                    notes = state.buckets.notes.len(),
                    archive = state.buckets.archive.len(),
                    trash = state.buckets.trash.len(),
                    "fetched notes"
                );
                Ok(())
            }
            Err(e) => {
                state.buckets = NoteBuckets::default();
                drop(state);
                tracing::error!(user_id = %user_id, "failed to fetch notes: {}", e);
                self.notifier
                    .notify(Toast::error("Error", "Failed to fetch notes."));
                Err(e)
            }
        }
    }

    /// Create a note on the backend for the session user.
    ///
    /// Blank title/content or a missing user id is logged and yields
    /// `Ok(None)` without a request. On success the returned note is put at
    /// the front of its list right away, then the lists are refetched.
    pub async fn create_note(&self, draft: NoteDraft) -> Result<Option<Note>> {
        if let Some(field) = draft.missing_field() {
            tracing::warn!(field, "cannot create note: missing field");
            return Ok(None);
        }
        let Some(user_id) = self.session.user_id() else {
            tracing::warn!("cannot create note: no user id in session");
            return Ok(None);
        };

        let body = CreateNoteBody::from_draft(draft, user_id, self.session.role);
        let note = match self.api.create_note(&body).await {
            Ok(note) => note,
            Err(e) => {
                tracing::error!("failed to create note: {}", e);
                self.notifier
                    .notify(Toast::error("Error", "Failed to create note."));
                return Err(e);
            }
        };

        self.state().buckets.prepend(note.clone());
        tracing::info!(id = %note.id, "created note");
        self.notifier
            .notify(Toast::success("Note Created", "Your note was successfully created."));

        // the creation already succeeded; a failed refetch has reported itself
        if let Err(e) = self.fetch_notes().await {
            tracing::warn!("refetch after create failed: {}", e);
        }

        Ok(Some(note))
    }

    /// Reclassify a note into `target`. Moving into its current bucket is a
    /// no-op.
    pub async fn move_note(&self, id: &str, target: NoteBucket) -> Result<Note> {
        let current = self.resolve(id)?;
        if current.bucket() == target {
            return Ok(current);
        }

        if let Err(e) = self.api.update_note_type(&current.id, target).await {
            tracing::error!(id = %current.id, "failed to move note to {}: {}", target, e);
            self.notifier
                .notify(Toast::error("Error", format!("Failed to move note to {}.", target)));
            return Err(e);
        }

        // one guard, so no reader sees the note outside every bucket
        let moved = {
            let mut state = self.state();
            let mut moved = state.buckets.remove(&current.id).unwrap_or(current);
            moved.note_type = Some(target);
            state.buckets.prepend(moved.clone());
            moved
        };

        tracing::info!(id = %moved.id, bucket = target.as_str(), "moved note");
        self.notifier.notify(Toast::success(
            "Note Updated",
            format!("Note moved to {}.", target),
        ));
        Ok(moved)
    }

    pub async fn archive_note(&self, id: &str) -> Result<Note> {
        self.move_note(id, NoteBucket::Archive).await
    }

    pub async fn trash_note(&self, id: &str) -> Result<Note> {
        self.move_note(id, NoteBucket::Trash).await
    }

    /// Back to the active notes list
    pub async fn restore_note(&self, id: &str) -> Result<Note> {
        self.move_note(id, NoteBucket::Note).await
    }

    pub async fn delete_note(&self, id: &str) -> Result<Note> {
        let note = self.resolve(id)?;

        if let Err(e) = self.api.delete_note(&note.id).await {
            tracing::error!(id = %note.id, "failed to delete note: {}", e);
            self.notifier
                .notify(Toast::error("Error", "Failed to delete note."));
            return Err(e);
        }

        self.state().buckets.remove(&note.id);
        tracing::info!(id = %note.id, "deleted note");
        self.notifier
            .notify(Toast::success("Note Deleted", "Note deleted permanently."));
        Ok(note)
    }
}
