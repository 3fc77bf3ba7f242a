use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{ContactDB, NewContactDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::customer_contacts;
use pitchdesk_core::contacts::{ContactRepositoryTrait, CustomerContact, NewCustomerContact};
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::RecordId;

pub struct ContactRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ContactRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ContactRepositoryTrait for ContactRepository {
    fn list_for_client(
        &self,
        owner: RecordId,
        client_id: RecordId,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<CustomerContact>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = customer_contacts::table
            .filter(customer_contacts::created_by.eq(owner))
            .filter(customer_contacts::client_id.eq(client_id))
            .into_boxed();

        if let Some(ids) = ids {
            query = query.filter(customer_contacts::id.eq_any(ids.to_vec()));
        }

        let rows = query
            .select(ContactDB::as_select())
            .order((customer_contacts::created_at.desc(), customer_contacts::id.desc()))
            .load::<ContactDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CustomerContact::from).collect())
    }

    fn find(&self, owner: RecordId, contact_id: RecordId) -> Result<Option<CustomerContact>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customer_contacts::table
            .filter(customer_contacts::id.eq(contact_id))
            .filter(customer_contacts::created_by.eq(owner))
            .select(ContactDB::as_select())
            .first::<ContactDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(CustomerContact::from))
    }

    async fn create_many(&self, contacts: Vec<NewCustomerContact>) -> Result<Vec<CustomerContact>> {
        // One transaction: either the whole batch lands or none of it.
        self.writer
            .exec(move |conn| {
                let mut created = Vec::with_capacity(contacts.len());
                for contact in contacts {
                    let row: NewContactDB = contact.into();
                    let saved = diesel::insert_into(customer_contacts::table)
                        .values(&row)
                        .returning(ContactDB::as_returning())
                        .get_result::<ContactDB>(conn)
                        .into_core()?;
                    created.push(saved.into());
                }
                Ok(created)
            })
            .await
    }

    async fn update(&self, contact: CustomerContact) -> Result<CustomerContact> {
        self.writer
            .exec(move |conn| {
                let row: ContactDB = contact.into();
                let updated = diesel::update(
                    customer_contacts::table
                        .filter(customer_contacts::id.eq(row.id))
                        .filter(customer_contacts::created_by.eq(row.created_by)),
                )
                .set(&row)
                .returning(ContactDB::as_returning())
                .get_result::<ContactDB>(conn)
                .optional()
                .into_core()?;
                updated
                    .map(CustomerContact::from)
                    .ok_or_else(|| Error::not_found("Customer contact"))
            })
            .await
    }

    async fn delete(&self, owner: RecordId, contact_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    customer_contacts::table
                        .filter(customer_contacts::id.eq(contact_id))
                        .filter(customer_contacts::created_by.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
