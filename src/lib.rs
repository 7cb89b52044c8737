pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod notes;
pub mod notify;
pub mod render;
pub mod session;
pub mod storage;

pub use api::{HttpNotesApi, NotesApi};
pub use config::Config;
pub use error::{NotedeskError, Result};
pub use notes::{LocalNotesPage, NotesBoard};
pub use session::{Role, UserSession};
