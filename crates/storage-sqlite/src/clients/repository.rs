use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{ClientDB, NewClientDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::clients;
use pitchdesk_core::clients::{Client, ClientRepositoryTrait, NewClient};
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::RecordId;

/// Repository for managing client data in the database
pub struct ClientRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ClientRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    fn list(&self, owner: RecordId) -> Result<Vec<Client>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = clients::table
            .filter(clients::created_by.eq(owner))
            .select(ClientDB::as_select())
            .order((clients::created_at.desc(), clients::id.desc()))
            .load::<ClientDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    fn find(&self, owner: RecordId, client_id: RecordId) -> Result<Option<Client>> {
        let mut conn = get_connection(&self.pool)?;
        let row = clients::table
            .filter(clients::id.eq(client_id))
            .filter(clients::created_by.eq(owner))
            .select(ClientDB::as_select())
            .first::<ClientDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Client::from))
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        self.writer
            .exec(move |conn| {
                let row: NewClientDB = new_client.into();
                let created = diesel::insert_into(clients::table)
                    .values(&row)
                    .returning(ClientDB::as_returning())
                    .get_result::<ClientDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, client: Client) -> Result<Client> {
        self.writer
            .exec(move |conn| {
                let row: ClientDB = client.into();
                let updated = diesel::update(
                    clients::table
                        .filter(clients::id.eq(row.id))
                        .filter(clients::created_by.eq(row.created_by)),
                )
                .set(&row)
                .returning(ClientDB::as_returning())
                .get_result::<ClientDB>(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Client::from)
                    .ok_or_else(|| Error::not_found("Client"))
            })
            .await
    }

    async fn delete(&self, owner: RecordId, client_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    clients::table
                        .filter(clients::id.eq(client_id))
                        .filter(clients::created_by.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
