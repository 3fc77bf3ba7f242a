use async_trait::async_trait;
use std::sync::Arc;

use super::notes_model::{rank_for_ai, Note, NoteFilter, NoteInput, NoteWithClient};
use super::notes_traits::{NoteRepositoryTrait, NoteServiceTrait};
use crate::clients::ClientRepositoryTrait;
use crate::constants::AI_CONTEXT_NOTES_LIMIT;
use crate::errors::{Error, Result};
use crate::RecordId;

pub struct NoteService {
    repository: Arc<dyn NoteRepositoryTrait>,
    client_repository: Arc<dyn ClientRepositoryTrait>,
}

impl NoteService {
    pub fn new(
        repository: Arc<dyn NoteRepositoryTrait>,
        client_repository: Arc<dyn ClientRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            client_repository,
        }
    }

    fn ensure_client(&self, owner: RecordId, client_id: Option<RecordId>) -> Result<()> {
        match client_id {
            Some(id) if self.client_repository.find(owner, id)?.is_none() => {
                Err(Error::not_found("Client"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl NoteServiceTrait for NoteService {
    fn list_notes(&self, owner: RecordId, filter: NoteFilter) -> Result<Vec<NoteWithClient>> {
        self.repository.list(owner, &filter)
    }

    fn get_note(&self, owner: RecordId, id: RecordId) -> Result<NoteWithClient> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found("Note"))
    }

    async fn create_note(&self, owner: RecordId, input: NoteInput) -> Result<NoteWithClient> {
        let new_note = input.into_new(owner)?;
        self.ensure_client(owner, new_note.client_id)?;
        let note = self.repository.create(new_note).await?;
        self.get_note(owner, note.id)
    }

    async fn update_note(
        &self,
        owner: RecordId,
        id: RecordId,
        input: NoteInput,
    ) -> Result<NoteWithClient> {
        let mut note = self.get_note(owner, id)?.note;
        self.ensure_client(owner, input.client_id)?;
        input.apply_to(&mut note)?;
        self.repository.update(note).await?;
        self.get_note(owner, id)
    }

    async fn delete_note(&self, owner: RecordId, id: RecordId) -> Result<()> {
        if self.repository.delete(owner, id).await? == 0 {
            return Err(Error::not_found("Note"));
        }
        Ok(())
    }

    fn ai_notes(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>> {
        let mut notes = self.repository.list_ai_relevant(owner, client_id)?;
        rank_for_ai(&mut notes);
        Ok(notes)
    }

    fn ai_context(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>> {
        let mut notes = self.ai_notes(owner, client_id)?;
        notes.truncate(AI_CONTEXT_NOTES_LIMIT);
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{NoteCategory, NotePriority};
    use crate::test_support::MemoryStore;

    fn note_input(title: &str, client_id: Option<RecordId>, priority: NotePriority) -> NoteInput {
        NoteInput {
            title: Some(title.to_string()),
            content: Some(format!("{title} details")),
            client_id,
            priority: Some(priority),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_note_expands_client() {
        let store = Arc::new(MemoryStore::new());
        let service = NoteService::new(store.clone(), store.clone());
        let client = store.seed_client(1, "Acme", "+1", "a@x.io");

        let created = service
            .create_note(1, note_input("Budget", Some(client.id), NotePriority::High))
            .await
            .unwrap();
        let summary = created.client.unwrap();
        assert_eq!(summary.name, "Acme");
        assert_eq!(created.note.category, NoteCategory::General);

        let err = service
            .create_note(1, note_input("Ghost", Some(999), NotePriority::Low))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn ai_context_ranks_and_caps_notes() {
        let store = Arc::new(MemoryStore::new());
        let service = NoteService::new(store.clone(), store.clone());
        let client = store.seed_client(1, "Acme", "+1", "a@x.io");

        for i in 0..12 {
            service
                .create_note(1, note_input(&format!("low {i}"), Some(client.id), NotePriority::Low))
                .await
                .unwrap();
        }
        service
            .create_note(1, note_input("key fact", Some(client.id), NotePriority::High))
            .await
            .unwrap();
        let mut hidden = note_input("private", Some(client.id), NotePriority::High);
        hidden.ai_relevant = Some(false);
        service.create_note(1, hidden).await.unwrap();

        let all = service.ai_notes(1, client.id).unwrap();
        assert_eq!(all.len(), 13);
        assert_eq!(all[0].title, "key fact");
        assert_eq!(all[1].title, "low 11");

        let context = service.ai_context(1, client.id).unwrap();
        assert_eq!(context.len(), AI_CONTEXT_NOTES_LIMIT);
    }

    #[tokio::test]
    async fn notes_are_invisible_to_other_tenants() {
        let store = Arc::new(MemoryStore::new());
        let service = NoteService::new(store.clone(), store.clone());
        let created = service
            .create_note(1, note_input("mine", None, NotePriority::Medium))
            .await
            .unwrap();
        let err = service.get_note(2, created.note.id).unwrap_err();
        assert_eq!(err.to_string(), "Note not found");
        assert!(service.list_notes(2, NoteFilter::default()).unwrap().is_empty());
    }
}
