//! Notes module - free-form knowledge about clients, optionally fed to the AI.

mod notes_model;
mod notes_service;
mod notes_traits;

pub use notes_model::{
    NewNote, Note, NoteCategory, NoteFilter, NoteInput, NotePriority, NoteWithClient,
};
pub use notes_service::NoteService;
pub use notes_traits::{NoteRepositoryTrait, NoteServiceTrait};
