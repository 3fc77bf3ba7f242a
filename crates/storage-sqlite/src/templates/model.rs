use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decode_list, encode_list, now};
use pitchdesk_core::templates::{NewTemplate, Template};
use pitchdesk_core::utils::{enum_from_text, enum_to_text};

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TemplateDB {
    pub id: i32,
    pub name: String,
    pub template_type: String,
    pub subject: Option<String>,
    pub content: String,
    pub variables: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::templates)]
pub struct NewTemplateDB {
    pub name: String,
    pub template_type: String,
    pub subject: Option<String>,
    pub content: String,
    pub variables: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TemplateDB> for Template {
    fn from(db: TemplateDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            template_type: enum_from_text(&db.template_type),
            subject: db.subject,
            content: db.content,
            variables: decode_list(&db.variables),
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Template> for TemplateDB {
    fn from(domain: Template) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            template_type: enum_to_text(&domain.template_type),
            subject: domain.subject,
            content: domain.content,
            variables: encode_list(&domain.variables),
            created_by: domain.created_by,
            created_at: domain.created_at,
            updated_at: now(),
        }
    }
}

impl From<NewTemplate> for NewTemplateDB {
    fn from(domain: NewTemplate) -> Self {
        let timestamp = now();
        Self {
            name: domain.name,
            template_type: enum_to_text(&domain.template_type),
            subject: domain.subject,
            content: domain.content,
            variables: encode_list(&domain.variables),
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
