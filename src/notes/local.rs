use crate::entity::{Note, NoteCategory, NoteDraft};
use crate::error::{NotedeskError, Result};
use crate::storage::LocalStorage;

/// Storage key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";

/// The local-storage notes page: one list of active notes, no buckets and no
/// backend.
#[derive(Debug)]
pub struct LocalNotesPage {
    storage: LocalStorage,
    notes: Vec<Note>,
}

impl LocalNotesPage {
    /// Read the stored list once. A value that does not parse as a note array
    /// is logged and treated as empty; it is only replaced on the next write.
    pub fn mount(storage: LocalStorage) -> Result<Self> {
        let notes = match storage.get_item(NOTES_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => notes,
                Err(e) => {
                    tracing::warn!(
                        path = %storage.path().display(),
                        "stored notes are not a valid note array, starting empty: {}",
                        e
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!(count = notes.len(), "mounted local notes");
        Ok(Self { storage, notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Prepend a note built from `draft` and rewrite the whole stored list.
    ///
    /// Returns `Ok(None)` without writing when title or content is blank.
    pub fn create(&mut self, draft: NoteDraft) -> Result<Option<Note>> {
        if let Some(field) = draft.missing_field() {
            tracing::warn!(field, "cannot create local note: missing field");
            return Ok(None);
        }

        let mut note = draft.into_note();
        note.category.get_or_insert(NoteCategory::default());

        self.notes.insert(0, note.clone());
        self.persist()?;

        tracing::info!(id = %note.id, "created local note");
        Ok(Some(note))
    }

    /// Remove the note with `id` (or unique id prefix) and rewrite the list.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let idx = self.position(id)?;
        let note = self.notes.remove(idx);
        self.persist()?;

        tracing::info!(id = %note.id, "deleted local note");
        Ok(note)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.notes.clear();
        self.storage.remove_item(NOTES_KEY)
    }

    fn position(&self, id: &str) -> Result<usize> {
        if let Some(idx) = self.notes.iter().position(|n| n.id == id) {
            return Ok(idx);
        }
        let matches: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| !id.is_empty() && n.id.starts_with(id))
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(NotedeskError::NotFound(id.to_string())),
            _ => Err(NotedeskError::InvalidValue(format!(
                "id prefix '{}' matches {} notes",
                id,
                matches.len()
            ))),
        }
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.notes)?;
        self.storage.set_item(NOTES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::open(tmp.path().join("local_storage.json"))
    }

    fn stored(storage: &LocalStorage) -> Value {
        let raw = storage.get_item(NOTES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_mount_empty_storage() {
        let tmp = TempDir::new().unwrap();
        let page = LocalNotesPage::mount(storage(&tmp)).unwrap();
        assert!(page.notes().is_empty());
    }

    #[test]
    fn test_create_into_empty_storage() {
        let tmp = TempDir::new().unwrap();
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();

        page.create(NoteDraft::new("A", "B")).unwrap().unwrap();

        let value = stored(&storage(&tmp));
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["title"], "A");
        assert_eq!(arr[0]["content"], "B");
        assert_eq!(arr[0]["type"], "personal");
    }

    #[test]
    fn test_create_prepends_and_keeps_prior_order() {
        let tmp = TempDir::new().unwrap();
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();
        page.create(NoteDraft::new("first", "1")).unwrap();
        page.create(NoteDraft::new("second", "2")).unwrap();
        let before = stored(&storage(&tmp));

        // remount to prove the list round-trips through storage
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();
        let created = page.create(NoteDraft::new("third", "3")).unwrap().unwrap();

        let after = stored(&storage(&tmp));
        let after = after.as_array().unwrap();
        assert_eq!(after[0]["id"], created.id.as_str());
        assert_eq!(after[0]["title"], "third");
        assert_eq!(&after[1..], before.as_array().unwrap().as_slice());
    }

    #[test]
    fn test_create_with_missing_title_does_not_write() {
        let tmp = TempDir::new().unwrap();
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();

        assert!(page.create(NoteDraft::new("", "body")).unwrap().is_none());
        assert!(page.notes().is_empty());
        assert!(!storage(&tmp).path().exists());
    }

    #[test]
    fn test_malformed_value_mounts_empty() {
        let tmp = TempDir::new().unwrap();
        let s = storage(&tmp);
        s.set_item(NOTES_KEY, "{not an array").unwrap();

        let mut page = LocalNotesPage::mount(s.clone()).unwrap();
        assert!(page.notes().is_empty());
        // left alone until the next write
        assert_eq!(s.get_item(NOTES_KEY).unwrap().as_deref(), Some("{not an array"));

        page.create(NoteDraft::new("A", "B")).unwrap();
        assert_eq!(stored(&s).as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_prefix() {
        let tmp = TempDir::new().unwrap();
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();
        let keep = page.create(NoteDraft::new("keep", "1")).unwrap().unwrap();
        let gone = page.create(NoteDraft::new("gone", "2")).unwrap().unwrap();

        let deleted = page.delete(&gone.id[..8]).unwrap();
        assert_eq!(deleted.id, gone.id);

        let value = stored(&storage(&tmp));
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["id"], keep.id.as_str());

        assert!(matches!(page.delete("nope"), Err(NotedeskError::NotFound(_))));
    }

    #[test]
    fn test_clear_removes_key() {
        let tmp = TempDir::new().unwrap();
        let mut page = LocalNotesPage::mount(storage(&tmp)).unwrap();
        page.create(NoteDraft::new("A", "B")).unwrap();
        page.clear().unwrap();

        assert!(page.notes().is_empty());
        assert_eq!(storage(&tmp).get_item(NOTES_KEY).unwrap(), None);
    }
}
