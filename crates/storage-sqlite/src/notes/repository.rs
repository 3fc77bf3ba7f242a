use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{note_with_client, NewNoteDB, NoteDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{clients, notes};
use crate::utils::ClientColumns;
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::notes::{NewNote, Note, NoteFilter, NoteRepositoryTrait, NoteWithClient};
use pitchdesk_core::utils::enum_to_text;
use pitchdesk_core::RecordId;

pub struct NoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NoteRepositoryTrait for NoteRepository {
    fn list(&self, owner: RecordId, filter: &NoteFilter) -> Result<Vec<NoteWithClient>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = notes::table
            .left_join(clients::table)
            .filter(notes::created_by.eq(owner))
            .into_boxed();

        if let Some(client) = filter.client_id {
            query = query.filter(notes::client_id.eq(client));
        }
        if let Some(category) = &filter.category {
            query = query.filter(notes::category.eq(enum_to_text(category)));
        }

        let rows = query
            .select((
                NoteDB::as_select(),
                (clients::id, clients::name, clients::business_name).nullable(),
            ))
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<(NoteDB, Option<ClientColumns>)>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(note_with_client).collect())
    }

    fn find(&self, owner: RecordId, note_id: RecordId) -> Result<Option<NoteWithClient>> {
        let mut conn = get_connection(&self.pool)?;
        let row = notes::table
            .left_join(clients::table)
            .filter(notes::id.eq(note_id))
            .filter(notes::created_by.eq(owner))
            .select((
                NoteDB::as_select(),
                (clients::id, clients::name, clients::business_name).nullable(),
            ))
            .first::<(NoteDB, Option<ClientColumns>)>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(note_with_client))
    }

    fn list_ai_relevant(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notes::table
            .filter(notes::created_by.eq(owner))
            .filter(notes::client_id.eq(client_id))
            .filter(notes::ai_relevant.eq(true))
            .select(NoteDB::as_select())
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<NoteDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn create(&self, new_note: NewNote) -> Result<Note> {
        self.writer
            .exec(move |conn| {
                let row: NewNoteDB = new_note.into();
                let created = diesel::insert_into(notes::table)
                    .values(&row)
                    .returning(NoteDB::as_returning())
                    .get_result::<NoteDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, note: Note) -> Result<Note> {
        self.writer
            .exec(move |conn| {
                let row: NoteDB = note.into();
                let updated = diesel::update(
                    notes::table
                        .filter(notes::id.eq(row.id))
                        .filter(notes::created_by.eq(row.created_by)),
                )
                .set(&row)
                .returning(NoteDB::as_returning())
                .get_result::<NoteDB>(conn)
                .optional()
                .into_core()?;
                updated.map(Note::from).ok_or_else(|| Error::not_found("Note"))
            })
            .await
    }

    async fn delete(&self, owner: RecordId, note_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    notes::table
                        .filter(notes::id.eq(note_id))
                        .filter(notes::created_by.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ClientRepository;
    use crate::db::test_support::setup;
    use pitchdesk_core::clients::ClientRepositoryTrait;
    use pitchdesk_core::notes::{NoteCategory, NotePriority};

    fn note(owner: RecordId, client_id: Option<RecordId>, title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "details".to_string(),
            client_id,
            category: NoteCategory::Preference,
            priority: NotePriority::High,
            ai_relevant: true,
            created_by: owner,
        }
    }

    #[tokio::test]
    async fn joins_client_and_filters() {
        let db = setup();
        let owner = db.user("owner@example.com").await;
        let client = db.client(owner, "Acme").await;
        let repo = NoteRepository::new(db.pool.clone(), db.writer.clone());

        let attached = repo.create(note(owner, Some(client.id), "Attached")).await.unwrap();
        repo.create(note(owner, None, "Loose")).await.unwrap();

        let found = repo.find(owner, attached.id).unwrap().unwrap();
        assert_eq!(found.note.priority, NotePriority::High);
        assert_eq!(found.client.map(|c| c.name), Some("Acme".to_string()));

        let all = repo.list(owner, &NoteFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].client.is_none());

        let for_client = repo
            .list(
                owner,
                &NoteFilter {
                    client_id: Some(client.id),
                    category: Some(NoteCategory::Preference),
                },
            )
            .unwrap();
        assert_eq!(for_client.len(), 1);

        let other_category = repo
            .list(
                owner,
                &NoteFilter {
                    client_id: None,
                    category: Some(NoteCategory::Campaign),
                },
            )
            .unwrap();
        assert!(other_category.is_empty());
    }

    #[tokio::test]
    async fn client_delete_detaches_notes() {
        let db = setup();
        let owner = db.user("owner@example.com").await;
        let client = db.client(owner, "Acme").await;
        let repo = NoteRepository::new(db.pool.clone(), db.writer.clone());
        let created = repo.create(note(owner, Some(client.id), "Keep me")).await.unwrap();

        let mut hidden = note(owner, Some(client.id), "Hidden");
        hidden.ai_relevant = false;
        repo.create(hidden).await.unwrap();
        assert_eq!(repo.list_ai_relevant(owner, client.id).unwrap().len(), 1);

        ClientRepository::new(db.pool.clone(), db.writer.clone())
            .delete(owner, client.id)
            .await
            .unwrap();
        let survivor = repo.find(owner, created.id).unwrap().unwrap();
        assert!(survivor.note.client_id.is_none());
        assert!(survivor.client.is_none());
    }
}
