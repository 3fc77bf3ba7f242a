use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{client_summary, now, ClientColumns};
use pitchdesk_core::notes::{NewNote, Note, NoteWithClient};
use pitchdesk_core::utils::{enum_from_text, enum_to_text};

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct NoteDB {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub client_id: Option<i32>,
    pub category: String,
    pub priority: String,
    pub ai_relevant: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNoteDB {
    pub title: String,
    pub content: String,
    pub client_id: Option<i32>,
    pub category: String,
    pub priority: String,
    pub ai_relevant: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<NoteDB> for Note {
    fn from(db: NoteDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            content: db.content,
            client_id: db.client_id,
            category: enum_from_text(&db.category),
            priority: enum_from_text(&db.priority),
            ai_relevant: db.ai_relevant,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

pub fn note_with_client((note, client): (NoteDB, Option<ClientColumns>)) -> NoteWithClient {
    NoteWithClient {
        note: note.into(),
        client: client_summary(client),
    }
}

impl From<Note> for NoteDB {
    fn from(domain: Note) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            content: domain.content,
            client_id: domain.client_id,
            category: enum_to_text(&domain.category),
            priority: enum_to_text(&domain.priority),
            ai_relevant: domain.ai_relevant,
            created_by: domain.created_by,
            created_at: domain.created_at,
            updated_at: now(),
        }
    }
}

impl From<NewNote> for NewNoteDB {
    fn from(domain: NewNote) -> Self {
        let timestamp = now();
        Self {
            title: domain.title,
            content: domain.content,
            client_id: domain.client_id,
            category: enum_to_text(&domain.category),
            priority: enum_to_text(&domain.priority),
            ai_relevant: domain.ai_relevant,
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
