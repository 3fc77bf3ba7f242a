use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decode_list, encode_list, now};
use pitchdesk_core::contacts::{CustomerContact, NewCustomerContact};

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::customer_contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ContactDB {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub client_id: i32,
    pub tags: String,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::customer_contacts)]
pub struct NewContactDB {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub client_id: i32,
    pub tags: String,
    pub notes: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ContactDB> for CustomerContact {
    fn from(db: ContactDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            phone_number: db.phone_number,
            client_id: db.client_id,
            tags: decode_list(&db.tags),
            notes: db.notes,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<CustomerContact> for ContactDB {
    fn from(domain: CustomerContact) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            phone_number: domain.phone_number,
            client_id: domain.client_id,
            tags: encode_list(&domain.tags),
            notes: domain.notes,
            created_by: domain.created_by,
            created_at: domain.created_at,
            updated_at: now(),
        }
    }
}

impl From<NewCustomerContact> for NewContactDB {
    fn from(domain: NewCustomerContact) -> Self {
        let timestamp = now();
        Self {
            name: domain.name,
            email: domain.email,
            phone_number: domain.phone_number,
            client_id: domain.client_id,
            tags: encode_list(&domain.tags),
            notes: domain.notes,
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
