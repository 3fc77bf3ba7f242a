use async_trait::async_trait;

use super::notes_model::{NewNote, Note, NoteFilter, NoteInput, NoteWithClient};
use crate::errors::Result;
use crate::RecordId;

#[async_trait]
pub trait NoteRepositoryTrait: Send + Sync {
    /// Owner's notes matching the filter, newest first.
    fn list(&self, owner: RecordId, filter: &NoteFilter) -> Result<Vec<NoteWithClient>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<NoteWithClient>>;
    /// AI-relevant notes of one client, newest first.
    fn list_ai_relevant(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>>;
    async fn create(&self, new_note: NewNote) -> Result<Note>;
    async fn update(&self, note: Note) -> Result<Note>;
    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize>;
}

#[async_trait]
pub trait NoteServiceTrait: Send + Sync {
    fn list_notes(&self, owner: RecordId, filter: NoteFilter) -> Result<Vec<NoteWithClient>>;
    fn get_note(&self, owner: RecordId, id: RecordId) -> Result<NoteWithClient>;
    async fn create_note(&self, owner: RecordId, input: NoteInput) -> Result<NoteWithClient>;
    async fn update_note(&self, owner: RecordId, id: RecordId, input: NoteInput)
        -> Result<NoteWithClient>;
    async fn delete_note(&self, owner: RecordId, id: RecordId) -> Result<()>;
    /// AI-relevant notes of a client ordered by priority, then recency.
    fn ai_notes(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>>;
    /// The capped slice of `ai_notes` injected into prompts.
    fn ai_context(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>>;
}
