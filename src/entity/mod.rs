mod bucket;
mod note;

pub use bucket::{NoteBucket, NoteCategory};
pub use note::{Note, NoteDraft};
