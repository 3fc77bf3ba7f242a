use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{ad_with_client, AdDB, NewAdDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{ads, clients};
use crate::utils::ClientColumns;
use pitchdesk_core::ads::{Ad, AdFilter, AdRepositoryTrait, AdWithClient, NewAd};
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::utils::enum_to_text;
use pitchdesk_core::RecordId;

pub struct AdRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AdRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AdRepositoryTrait for AdRepository {
    fn list(&self, owner: RecordId, filter: &AdFilter) -> Result<Vec<AdWithClient>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = ads::table
            .left_join(clients::table)
            .filter(ads::created_by.eq(owner))
            .into_boxed();

        if let Some(status) = &filter.status {
            query = query.filter(ads::status.eq(enum_to_text(status)));
        }
        if let Some(client) = filter.client_id {
            query = query.filter(ads::client_id.eq(client));
        }

        let rows = query
            .select((
                AdDB::as_select(),
                (clients::id, clients::name, clients::business_name).nullable(),
            ))
            .order((ads::created_at.desc(), ads::id.desc()))
            .load::<(AdDB, Option<ClientColumns>)>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(ad_with_client).collect())
    }

    fn find(&self, owner: RecordId, ad_id: RecordId) -> Result<Option<AdWithClient>> {
        let mut conn = get_connection(&self.pool)?;
        let row = ads::table
            .left_join(clients::table)
            .filter(ads::id.eq(ad_id))
            .filter(ads::created_by.eq(owner))
            .select((
                AdDB::as_select(),
                (clients::id, clients::name, clients::business_name).nullable(),
            ))
            .first::<(AdDB, Option<ClientColumns>)>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(ad_with_client))
    }

    async fn create(&self, new_ad: NewAd) -> Result<Ad> {
        self.writer
            .exec(move |conn| {
                let row: NewAdDB = new_ad.into();
                let created = diesel::insert_into(ads::table)
                    .values(&row)
                    .returning(AdDB::as_returning())
                    .get_result::<AdDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, ad: Ad) -> Result<Ad> {
        self.writer
            .exec(move |conn| {
                let row: AdDB = ad.into();
                let updated = diesel::update(
                    ads::table
                        .filter(ads::id.eq(row.id))
                        .filter(ads::created_by.eq(row.created_by)),
                )
                .set(&row)
                .returning(AdDB::as_returning())
                .get_result::<AdDB>(conn)
                .optional()
                .into_core()?;
                updated.map(Ad::from).ok_or_else(|| Error::not_found("Ad"))
            })
            .await
    }

    async fn delete(&self, owner: RecordId, ad_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    ads::table
                        .filter(ads::id.eq(ad_id))
                        .filter(ads::created_by.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
