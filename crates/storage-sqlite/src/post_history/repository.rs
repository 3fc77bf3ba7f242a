use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{post_with_ad, NewPostHistoryDB, PostHistoryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{ads, post_history};
use crate::utils::AdColumns;
use pitchdesk_core::errors::Result;
use pitchdesk_core::post_history::{
    NewPostHistory, PostFilter, PostHistory, PostHistoryRepositoryTrait, PostWithAd,
};
use pitchdesk_core::utils::enum_to_text;
use pitchdesk_core::RecordId;

/// Append-only log of publish attempts.
pub struct PostHistoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PostHistoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PostHistoryRepositoryTrait for PostHistoryRepository {
    fn list(&self, owner: RecordId, filter: &PostFilter) -> Result<Vec<PostWithAd>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = post_history::table
            .left_join(ads::table)
            .filter(post_history::created_by.eq(owner))
            .into_boxed();

        if let Some(platform) = &filter.platform {
            query = query.filter(post_history::platform.eq(enum_to_text(platform)));
        }
        if let Some(ad) = filter.ad_id {
            query = query.filter(post_history::ad_id.eq(ad));
        }

        let rows = query
            .select((
                PostHistoryDB::as_select(),
                (ads::id, ads::title, ads::description).nullable(),
            ))
            .order((post_history::published_at.desc(), post_history::id.desc()))
            .load::<(PostHistoryDB, Option<AdColumns>)>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(post_with_ad).collect())
    }

    fn find(&self, owner: RecordId, post_id: RecordId) -> Result<Option<PostWithAd>> {
        let mut conn = get_connection(&self.pool)?;
        let row = post_history::table
            .left_join(ads::table)
            .filter(post_history::id.eq(post_id))
            .filter(post_history::created_by.eq(owner))
            .select((
                PostHistoryDB::as_select(),
                (ads::id, ads::title, ads::description).nullable(),
            ))
            .first::<(PostHistoryDB, Option<AdColumns>)>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(post_with_ad))
    }

    async fn create(&self, entry: NewPostHistory) -> Result<PostHistory> {
        self.writer
            .exec(move |conn| {
                let row: NewPostHistoryDB = entry.into();
                let created = diesel::insert_into(post_history::table)
                    .values(&row)
                    .returning(PostHistoryDB::as_returning())
                    .get_result::<PostHistoryDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }
}
