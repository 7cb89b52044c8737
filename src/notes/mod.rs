//! Note collections: the remote board with its Note/Archive/Trash buckets, and
//! the single-list page kept in local storage.
//!
//! The two are independent. Nothing moves notes from one to the other.

mod board;
mod filter;
mod local;
mod partition;

pub use board::NotesBoard;
pub use filter::NoteFilter;
pub use local::{LocalNotesPage, NOTES_KEY};
pub use partition::{partition_notes, NoteBuckets};
