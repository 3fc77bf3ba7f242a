use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{NewTemplateDB, TemplateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::templates;
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::templates::{NewTemplate, Template, TemplateRepositoryTrait, TemplateType};
use pitchdesk_core::utils::enum_to_text;
use pitchdesk_core::RecordId;

pub struct TemplateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TemplateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TemplateRepositoryTrait for TemplateRepository {
    fn list(&self, owner: RecordId, template_type: Option<TemplateType>) -> Result<Vec<Template>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = templates::table
            .filter(templates::created_by.eq(owner))
            .into_boxed();
        if let Some(kind) = template_type {
            query = query.filter(templates::template_type.eq(enum_to_text(&kind)));
        }

        let rows = query
            .select(TemplateDB::as_select())
            .order((templates::created_at.desc(), templates::id.desc()))
            .load::<TemplateDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Template::from).collect())
    }

    fn find(&self, owner: RecordId, template_id: RecordId) -> Result<Option<Template>> {
        let mut conn = get_connection(&self.pool)?;
        let row = templates::table
            .filter(templates::id.eq(template_id))
            .filter(templates::created_by.eq(owner))
            .select(TemplateDB::as_select())
            .first::<TemplateDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Template::from))
    }

    async fn create(&self, new_template: NewTemplate) -> Result<Template> {
        self.writer
            .exec(move |conn| {
                let row: NewTemplateDB = new_template.into();
                let created = diesel::insert_into(templates::table)
                    .values(&row)
                    .returning(TemplateDB::as_returning())
                    .get_result::<TemplateDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, template: Template) -> Result<Template> {
        self.writer
            .exec(move |conn| {
                let row: TemplateDB = template.into();
                let updated = diesel::update(
                    templates::table
                        .filter(templates::id.eq(row.id))
                        .filter(templates::created_by.eq(row.created_by)),
                )
                .set(&row)
                .returning(TemplateDB::as_returning())
                .get_result::<TemplateDB>(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Template::from)
                    .ok_or_else(|| Error::not_found("Template"))
            })
            .await
    }

    async fn delete(&self, owner: RecordId, template_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    templates::table
                        .filter(templates::id.eq(template_id))
                        .filter(templates::created_by.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
