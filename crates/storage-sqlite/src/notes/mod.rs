//! SQLite storage implementation for client notes.

mod model;
mod repository;

pub use model::{NewNoteDB, NoteDB};
pub use repository::NoteRepository;
