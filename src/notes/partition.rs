use crate::entity::{Note, NoteBucket};

/// Notes split by lifecycle bucket. Each note appears in exactly one list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteBuckets {
    pub notes: Vec<Note>,
    pub archive: Vec<Note>,
    pub trash: Vec<Note>,
}

impl NoteBuckets {
    pub fn get(&self, bucket: NoteBucket) -> &[Note] {
        match bucket {
            NoteBucket::Note => &self.notes,
            NoteBucket::Archive => &self.archive,
            NoteBucket::Trash => &self.trash,
        }
    }

    pub fn get_mut(&mut self, bucket: NoteBucket) -> &mut Vec<Note> {
        match bucket {
            NoteBucket::Note => &mut self.notes,
            NoteBucket::Archive => &mut self.archive,
            NoteBucket::Trash => &mut self.trash,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len() + self.archive.len() + self.trash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate a note by id: its bucket and position in that list.
    pub fn find(&self, id: &str) -> Option<(NoteBucket, usize)> {
        NoteBucket::ALL.into_iter().find_map(|bucket| {
            self.get(bucket)
                .iter()
                .position(|n| n.id == id)
                .map(|idx| (bucket, idx))
        })
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.find(id).map(|(bucket, idx)| &self.get(bucket)[idx])
    }

    /// Take a note out of whichever list holds it.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let (bucket, idx) = self.find(id)?;
        Some(self.get_mut(bucket).remove(idx))
    }

    /// Put `note` at the front of the list its `noteType` names.
    pub fn prepend(&mut self, note: Note) {
        self.get_mut(note.bucket()).insert(0, note);
    }
}

/// Split a flat response into buckets, keeping response order within each.
pub fn partition_notes(notes: Vec<Note>) -> NoteBuckets {
    let mut buckets = NoteBuckets::default();
    for note in notes {
        buckets.get_mut(note.bucket()).push(note);
    }
    buckets
}
